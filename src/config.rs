//! Run configuration assembled from the command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use crate::session::SessionSettings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Proxy file not found: {0}")]
    ProxyFileNotFound(PathBuf),

    #[error("Failed to read proxy file {path}: {source}")]
    ProxyFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid proxy entry '{0}' (expected host:port)")]
    InvalidProxy(String),

    #[error("Invalid value for {field}: {value} (expected a non-negative number of seconds)")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("At least one search engine must be selected")]
    NoEngines,
}

/// Where proxies come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxySource {
    None,
    List(Vec<String>),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub conn_timeout: Duration,
    pub budget: Duration,
    pub jitter: Duration,
    pub engines: Vec<String>,
    pub proxies: Vec<String>,
}

impl SearchConfig {
    pub fn new(
        conn_timeout: f64,
        budget: f64,
        jitter: f64,
        engines: Vec<String>,
        proxy_source: &ProxySource,
    ) -> Result<Self, ConfigError> {
        let engines: Vec<String> = engines
            .into_iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if engines.is_empty() {
            return Err(ConfigError::NoEngines);
        }

        Ok(SearchConfig {
            conn_timeout: seconds("connection timeout", conn_timeout)?,
            budget: seconds("timeout", budget)?,
            jitter: seconds("jitter", jitter)?,
            engines,
            proxies: load_proxies(proxy_source)?,
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            budget: self.budget,
            jitter: self.jitter,
        }
    }
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { field, value })
}

pub fn load_proxies(source: &ProxySource) -> Result<Vec<String>, ConfigError> {
    let entries = match source {
        ProxySource::None => return Ok(Vec::new()),
        ProxySource::List(list) => list.iter().map(|p| p.trim().to_string()).collect(),
        ProxySource::File(path) => read_proxy_file(path)?,
    };

    for entry in &entries {
        validate_proxy(entry)?;
    }
    Ok(entries)
}

fn read_proxy_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ProxyFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ProxyFileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn validate_proxy(entry: &str) -> Result<(), ConfigError> {
    let address = entry.split_once("://").map(|(_, rest)| rest).unwrap_or(entry);
    let address = address.rsplit_once('@').map(|(_, host)| host).unwrap_or(address);
    let valid = address
        .rsplit_once(':')
        .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidProxy(entry.to_string()))
    }
}
