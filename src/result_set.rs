use std::collections::HashSet;
use std::sync::Arc;
use log::{debug, error};
use crate::profile::{is_malformed, ProfileRecord};
use crate::record_log::{RecordSink, SessionStamp};

/// Accepted records of one session, in discovery order.
///
/// Append-only; structurally equal records and malformed names are refused.
/// Every accepted record is forwarded to the sink straight away.
pub struct ResultSet {
    records: Vec<ProfileRecord>,
    seen: HashSet<ProfileRecord>,
    sink: Arc<dyn RecordSink>,
    stamp: SessionStamp,
}

impl ResultSet {
    pub fn new(sink: Arc<dyn RecordSink>, stamp: SessionStamp) -> Self {
        ResultSet {
            records: Vec::new(),
            seen: HashSet::new(),
            sink,
            stamp,
        }
    }

    /// Returns `true` if the record was new and well formed.
    pub fn accept(&mut self, record: ProfileRecord) -> bool {
        if is_malformed(&record) || self.seen.contains(&record) {
            return false;
        }

        debug!("name: {:25} RawTxt: {}", record.name, record.text);
        if let Err(e) = self.sink.record(&self.stamp, &record) {
            error!("Failed to persist record for {}: {}", record.name, e);
        }

        self.seen.insert(record.clone());
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProfileRecord> {
        self.records
    }
}
