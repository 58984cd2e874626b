use log::LevelFilter;
use env_logger::{Builder, Target};
use std::io::Write;
use chrono::Local;

/// Console logging for the binary. Dependencies stay at `Warn`; `--debug`
/// lowers this crate to `Debug` and tags each line with its module.
pub fn init(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Info };

    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .format(move |buf, record| {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            if debug {
                writeln!(buf, "{} [{}] {} - {}", stamp, record.level(), record.target(), record.args())
            } else {
                writeln!(buf, "{} [{}] - {}", stamp, record.level(), record.args())
            }
        })
        .filter(None, LevelFilter::Warn)
        .filter(Some(env!("CARGO_CRATE_NAME")), level);

    if builder.try_init().is_err() {
        return;
    }
    log::debug!("Debug logging enabled.");
}
