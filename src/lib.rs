pub mod cancel;
pub mod cli;
pub mod company_search;
pub mod config;
pub mod delay_manager;
pub mod extractor;
pub mod input_loader;
pub mod logger;
pub mod name_format;
pub mod profile;
pub mod record_log;
pub mod result_set;
pub mod search_engine;
pub mod session;
pub mod transport;

// Exporting types for convenience
pub use cancel::CancelToken;
pub use company_search::CompanySearch;
pub use config::{ConfigError, ProxySource, SearchConfig};
pub use profile::ProfileRecord;
pub use record_log::{CsvRecordLog, RecordSink};
pub use result_set::ResultSet;
pub use search_engine::EngineSpec;
pub use session::{search_engines, SearchSession, SessionSettings};
pub use transport::Transport;
