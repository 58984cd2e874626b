use linkscout::{input_loader, logger, search_engine};
use linkscout::{search_engines, CancelToken, CompanySearch, CsvRecordLog, ProfileRecord, SearchConfig, Transport};
use linkscout::cli::{Cli, Mode};
use linkscout::name_format::NameFormat;

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use clap::Parser;
use log::{error, info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn banner() {
    eprintln!(
        r#"
    __    _       __   _____                  __
   / /   (_)___  / /__/ ___/_________  __  __/ /_
  / /   / / __ \/ //_/\__ \/ ___/ __ \/ / / / __/
 / /___/ / / / / ,<  ___/ / /__/ /_/ / /_/ / /_
/_____/_/_/ /_/_/|_|/____/\___/\____/\__,_/\__/  v{}
"#,
        VERSION
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    banner();
    let args = Cli::parse();
    logger::init(args.debug);

    let mode = match args.mode() {
        Ok(mode) => mode,
        Err(e) => {
            error!("Invalid arguments: {}", e);
            process::exit(2);
        }
    };

    let config = match SearchConfig::new(
        args.conn_timeout,
        args.timeout,
        args.jitter,
        args.engine_names(),
        &args.proxy_source(),
    ) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let token = CancelToken::new();
    install_interrupt_handler(token.clone());

    match mode {
        Mode::DomainLookup { domain } => run_domain_lookup(&args, &config, &domain, &token),
        Mode::Scrape { target, name_format } => {
            let records = run_scrape(&args, &config, &target, &token)?;
            let names: Vec<String> = records.into_iter().map(|r| r.name).collect();
            write_names(&args, &name_format, &names)
        }
        Mode::Reformat { path, name_format } => {
            info!("Parsing employee names from {:?}", path);
            let names = input_loader::load_names(&path)?;
            write_names(&args, &name_format, &names)
        }
    }
}

/// First Ctrl-C cancels the running search; a second one exits immediately.
fn install_interrupt_handler(token: CancelToken) {
    let interrupted = AtomicBool::new(false);
    let result = ctrlc::set_handler(move || {
        if interrupted.swap(true, Ordering::SeqCst) {
            eprintln!("\nForce exiting.");
            process::exit(130);
        }
        token.cancel();
    });
    if let Err(e) = result {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }
}

fn run_scrape(
    args: &Cli,
    config: &SearchConfig,
    target: &str,
    token: &CancelToken,
) -> Result<Vec<ProfileRecord>, Box<dyn Error>> {
    let engines = search_engine::resolve(&config.engines);
    info!("Searching {} for valid employee names at \"{}\"", config.engines.join(", "), target);

    let transport = Transport::new(config.conn_timeout, &config.proxies)?;
    let log = Arc::new(CsvRecordLog::open(format!("{}.csv", args.output))?);
    info!("Recording results to {}", log.path().display());

    Ok(search_engines(&engines, target, &transport, config.session_settings(), log, token))
}

fn run_domain_lookup(
    args: &Cli,
    config: &SearchConfig,
    domain: &str,
    token: &CancelToken,
) -> Result<(), Box<dyn Error>> {
    let Some(engine) = search_engine::company_engine(&search_engine::resolve(&config.engines)) else {
        error!("No search engine available for company lookup");
        process::exit(1);
    };

    let transport = Transport::new(config.conn_timeout, &config.proxies)?;
    if let Some(company) = CompanySearch::new(&engine, domain, &transport, token.clone()).search() {
        println!("{}", company);
        let path = format!("{}_company.txt", args.output);
        let mut file = File::create(&path)?;
        writeln!(file, "{}", company)?;
        info!("Company name saved to {}!", path);
    }
    Ok(())
}

/// Formats every name, drops repeats, and writes the rest in order to `<output>.txt`.
fn write_names(args: &Cli, template: &str, names: &[String]) -> Result<(), Box<dyn Error>> {
    if names.is_empty() {
        warn!("No results found");
        return Ok(());
    }
    info!("{} names collected", names.len());

    let format = NameFormat::new(template);
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        let formatted = format.format(name);
        if !unique.contains(&formatted) {
            unique.push(formatted);
        }
    }

    let path = format!("{}.txt", args.output);
    let mut writer = BufWriter::new(File::create(&path)?);
    for name in &unique {
        writeln!(writer, "{}", name)?;
    }
    writer.flush()?;

    info!("{} unique names added to {}!", unique.len(), path);
    Ok(())
}
