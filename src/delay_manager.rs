use std::time::Duration;
use log::debug;
use crate::cancel::CancelToken;

/// Fixed pause between consecutive search requests.
///
/// Returns `false` when the pause was cut short by cancellation, so the
/// caller can stop without issuing another request.
pub fn jitter(delay: Duration, token: &CancelToken) -> bool {
    if delay.is_zero() {
        return !token.is_cancelled();
    }
    debug!("Waiting for {:.2} seconds (Jitter)...", delay.as_secs_f64());
    !token.sleep(delay)
}
