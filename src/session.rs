//! The bounded-time search loop.
//!
//! A session pages through one engine's results for one target until its
//! wall-clock budget runs out, a page comes back with anything but 200, or the
//! shared [`CancelToken`] fires. The deadline is polled at iteration
//! boundaries; a request already in flight is allowed to finish, bounded by
//! the transport timeout.

use std::sync::Arc;
use std::time::Duration;
use log::{debug, info, warn};
use crate::cancel::{CancelToken, Deadline};
use crate::delay_manager;
use crate::extractor::extract_links;
use crate::profile::{parse_profile, ProfileRecord};
use crate::record_log::{RecordSink, SessionStamp};
use crate::result_set::ResultSet;
use crate::search_engine::EngineSpec;
use crate::transport::{status_code, Transport};

/// Timing knobs for one session.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Total wall-clock budget for the engine.
    pub budget: Duration,
    /// Pause between consecutive requests.
    pub jitter: Duration,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DeadlineReached,
    Unsuccessful(u16),
    Cancelled,
}

pub struct SearchSession<'a> {
    engine: &'a EngineSpec,
    target: &'a str,
    transport: &'a Transport,
    settings: SessionSettings,
    token: CancelToken,
    results: ResultSet,
}

impl<'a> SearchSession<'a> {
    pub fn new(
        engine: &'a EngineSpec,
        target: &'a str,
        transport: &'a Transport,
        settings: SessionSettings,
        sink: Arc<dyn RecordSink>,
        token: CancelToken,
    ) -> Self {
        let stamp = SessionStamp::now(engine.name());
        SearchSession {
            engine,
            target,
            transport,
            settings,
            token,
            results: ResultSet::new(sink, stamp),
        }
    }

    /// Runs the loop to completion and hands back whatever was accepted.
    pub fn run(self) -> Vec<ProfileRecord> {
        self.run_with_reason().0
    }

    pub fn run_with_reason(mut self) -> (Vec<ProfileRecord>, StopReason) {
        let deadline = Deadline::after(self.settings.budget);
        debug!("Starting {} search ({:.1}s budget)", self.engine.name(), deadline.remaining().as_secs_f64());
        let reason = loop {
            if self.token.is_cancelled() {
                break StopReason::Cancelled;
            }
            if deadline.expired() {
                break StopReason::DeadlineReached;
            }
            if let Some(reason) = self.step() {
                break reason;
            }
        };
        if reason == StopReason::Cancelled {
            warn!("Key event detected, exiting search...");
        }
        (self.results.into_records(), reason)
    }

    /// One page: fetch, parse, accept, pause.
    fn step(&mut self) -> Option<StopReason> {
        let url = self.engine.query_url(self.target, self.results.len());
        let page = self.transport.fetch(&url);
        let status = status_code(page.as_ref());

        let page = match page {
            Some(page) if page.is_success() => page,
            _ => {
                info!("{:<3} {} ({})", self.results.len(), url, status);
                warn!("None 200 response, exiting search ({})", status);
                return Some(StopReason::Unsuccessful(status));
            }
        };

        for anchor in extract_links(&page.body) {
            let Some(href) = anchor.href.as_deref() else {
                continue;
            };
            if let Some(record) = parse_profile(href, &anchor.text) {
                self.results.accept(record);
            }
        }
        info!("{:<3} {} ({})", self.results.len(), url, status);

        if !delay_manager::jitter(self.settings.jitter, &self.token) {
            return Some(StopReason::Cancelled);
        }
        None
    }
}

/// Runs one session per engine, in order, and merges their results.
///
/// Each engine gets its own full budget. Cancellation stops the active
/// session and skips the ones that have not started.
pub fn search_engines(
    engines: &[EngineSpec],
    target: &str,
    transport: &Transport,
    settings: SessionSettings,
    sink: Arc<dyn RecordSink>,
    token: &CancelToken,
) -> Vec<ProfileRecord> {
    let mut merged = Vec::new();
    for engine in engines {
        if token.is_cancelled() {
            break;
        }
        let session = SearchSession::new(engine, target, transport, settings, sink.clone(), token.clone());
        merged.extend(session.run());
    }
    merged
}
