use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use chrono::Local;
use csv::{QuoteStyle, Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::profile::ProfileRecord;

pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to open record log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write record log: {0}")]
    Csv(#[from] csv::Error),

    #[error("Record log I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifies the session a record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStamp {
    pub started_at: String,
    pub engine: String,
}

impl SessionStamp {
    pub fn now(engine: &str) -> Self {
        SessionStamp {
            started_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            engine: engine.to_string(),
        }
    }
}

/// One line of the persisted record log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRow {
    pub timestamp: String,
    pub engine: String,
    pub name: String,
    pub title: String,
    pub url: String,
    pub text: String,
}

impl LogRow {
    pub fn new(stamp: &SessionStamp, record: &ProfileRecord) -> Self {
        LogRow {
            timestamp: stamp.started_at.clone(),
            engine: stamp.engine.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            url: record.url.clone(),
            text: record.text.clone(),
        }
    }
}

/// Destination for accepted records, written as they are found so an
/// interrupted run keeps what it already discovered.
pub trait RecordSink: Send + Sync {
    fn record(&self, stamp: &SessionStamp, record: &ProfileRecord) -> Result<(), LogError>;
}

/// Append-only CSV log shared by every session of one invocation.
///
/// Writes are serialised through a mutex and flushed per record, so each
/// record lands as one complete line.
pub struct CsvRecordLog {
    writer: Mutex<Writer<File>>,
    path: PathBuf,
}

impl CsvRecordLog {
    /// Opens `path` for appending; the header row is written only for a new file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let needs_header = std::fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::Open { path: path.clone(), source })?;

        let writer = WriterBuilder::new()
            .has_headers(needs_header)
            .quote_style(QuoteStyle::Always)
            .from_writer(file);

        Ok(CsvRecordLog {
            writer: Mutex::new(writer),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvRecordLog {
    fn record(&self, stamp: &SessionStamp, record: &ProfileRecord) -> Result<(), LogError> {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writer.serialize(LogRow::new(stamp, record))?;
        writer.flush()?;
        Ok(())
    }
}

/// Sink that discards everything, for callers that only keep the records a session returns.
pub struct NullSink;

impl RecordSink for NullSink {
    fn record(&self, _stamp: &SessionStamp, _record: &ProfileRecord) -> Result<(), LogError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str) -> ProfileRecord {
        ProfileRecord {
            url: format!("https://www.linkedin.com/in/{}", name.replace(' ', "-")),
            text: format!("{} - Engineer", name),
            name: name.to_string(),
            title: "Engineer".to_string(),
        }
    }

    fn stamp() -> SessionStamp {
        SessionStamp {
            started_at: "01-02-2024 10:11:12".to_string(),
            engine: "google".to_string(),
        }
    }

    #[test]
    fn test_writes_header_and_quoted_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("names.csv");

        let log = CsvRecordLog::open(&path).unwrap();
        log.record(&stamp(), &record("jane doe")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#""timestamp","engine","name","title","url","text""#);
        assert_eq!(
            lines[1],
            r#""01-02-2024 10:11:12","google","jane doe","Engineer","https://www.linkedin.com/in/jane-doe","jane doe - Engineer""#
        );
    }

    #[test]
    fn test_reopen_appends_without_second_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("names.csv");

        {
            let log = CsvRecordLog::open(&path).unwrap();
            log.record(&stamp(), &record("jane doe")).unwrap();
        }
        {
            let log = CsvRecordLog::open(&path).unwrap();
            log.record(&stamp(), &record("john roe")).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.matches("\"timestamp\"").count(), 1);
    }

    #[test]
    fn test_record_is_flushed_immediately() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("names.csv");
        let log = CsvRecordLog::open(&path).unwrap();

        log.record(&stamp(), &record("jane doe")).unwrap();
        // log is still open
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("jane doe"));
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let sink = NullSink;
        assert!(sink.record(&stamp(), &record("jane doe")).is_ok());
        assert!(sink.record(&stamp(), &record("jane doe")).is_ok());
    }

    #[test]
    fn test_concurrent_writers_produce_whole_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("names.csv");
        let log = std::sync::Arc::new(CsvRecordLog::open(&path).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.record(&stamp(), &record(&format!("user {} {}", t, i))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<LogRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 100);
    }
}
