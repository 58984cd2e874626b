use std::path::PathBuf;
use clap::Parser;
use crate::config::ProxySource;
use crate::search_engine::DEFAULT_ENGINES;

#[derive(Parser, Debug)]
#[command(name = "linkscout")]
#[command(about = "Collect employee names for an organization from search engine results")]
#[command(version)]
pub struct Cli {
    /// Target company name, or a previously written .csv record log to re-format
    pub target: Option<String>,

    /// Max time budget per search engine, in seconds
    #[arg(short = 't', long, default_value_t = 15.0)]
    pub timeout: f64,

    /// Delay between requests, in seconds
    #[arg(short = 'j', long, default_value_t = 1.0)]
    pub jitter: f64,

    /// Per-request connection timeout, in seconds
    #[arg(long, default_value_t = 3.0)]
    pub conn_timeout: f64,

    /// Search for employees by company name
    #[arg(short = 'c', long = "company", conflicts_with = "domain")]
    pub company_search: bool,

    /// Look up the company name for a web domain
    #[arg(short = 'd', long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Comma-separated search engines
    #[arg(long = "search", value_delimiter = ',', default_values_t = DEFAULT_ENGINES.map(String::from))]
    pub engines: Vec<String>,

    /// Name format, ex: 'domain\{f}{last}', '{first}.{last}@domain.com'
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    pub name_format: Option<String>,

    /// Base name of the output files (extension omitted)
    #[arg(short = 'o', long, default_value = "names")]
    pub output: String,

    /// Proxy requests through HOST:PORT (repeatable)
    #[arg(long = "proxy", value_name = "HOST:PORT", conflicts_with = "proxy_file")]
    pub proxies: Vec<String>,

    /// Load proxies from file for rotation
    #[arg(long, value_name = "PATH")]
    pub proxy_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, hide = true)]
    pub debug: bool,
}

/// What the invocation asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    DomainLookup { domain: String },
    Scrape { target: String, name_format: String },
    Reformat { path: PathBuf, name_format: String },
}

impl Cli {
    pub fn proxy_source(&self) -> ProxySource {
        if let Some(path) = &self.proxy_file {
            ProxySource::File(path.clone())
        } else if !self.proxies.is_empty() {
            ProxySource::List(self.proxies.clone())
        } else {
            ProxySource::None
        }
    }

    pub fn engine_names(&self) -> Vec<String> {
        self.engines
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    pub fn mode(&self) -> Result<Mode, String> {
        if let Some(domain) = &self.domain {
            if domain.trim().is_empty() {
                return Err("Domain cannot be empty".to_string());
            }
            return Ok(Mode::DomainLookup { domain: domain.trim().to_string() });
        }

        let target = match &self.target {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => {
                return Err(if self.company_search {
                    "company name is required when using -c flag".to_string()
                } else {
                    "a target company name or .csv file is required".to_string()
                })
            }
        };

        let name_format = self
            .name_format
            .clone()
            .ok_or_else(|| "-f is required when searching for names".to_string())?;

        if crate::input_loader::is_record_log(&target) {
            Ok(Mode::Reformat { path: PathBuf::from(target), name_format })
        } else {
            Ok(Mode::Scrape { target, name_format })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("linkscout").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["Acme Corp", "-f", "{first}.{last}@acme.com"]);
        assert_eq!(cli.timeout, 15.0);
        assert_eq!(cli.jitter, 1.0);
        assert_eq!(cli.conn_timeout, 3.0);
        assert_eq!(cli.engine_names(), vec!["google", "bing"]);
        assert_eq!(cli.engine_names(), DEFAULT_ENGINES.to_vec());
        assert_eq!(cli.output, "names");
        assert_eq!(cli.proxy_source(), ProxySource::None);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Scrape { target: "Acme Corp".to_string(), name_format: "{first}.{last}@acme.com".to_string() }
        );
    }

    #[test]
    fn test_engine_list() {
        let cli = parse(&["Acme", "-f", "{first}", "--search", "bing, google"]);
        assert_eq!(cli.engine_names(), vec!["bing", "google"]);
    }

    #[test]
    fn test_domain_mode_needs_no_format() {
        let cli = parse(&["-d", "acme.com"]);
        assert_eq!(cli.mode().unwrap(), Mode::DomainLookup { domain: "acme.com".to_string() });
    }

    #[test]
    fn test_format_required_for_scrape() {
        let cli = parse(&["-c", "Acme"]);
        assert!(cli.mode().is_err());

        let cli = parse(&["-c"]);
        assert_eq!(cli.mode().unwrap_err(), "company name is required when using -c flag");
    }

    #[test]
    fn test_csv_target_reformats() {
        let cli = parse(&["old.csv", "-f", "{f}{last}"]);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Reformat { path: PathBuf::from("old.csv"), name_format: "{f}{last}".to_string() }
        );
    }

    #[test]
    fn test_proxy_sources() {
        let cli = parse(&["-d", "acme.com", "--proxy", "10.0.0.1:80", "--proxy", "10.0.0.2:80"]);
        assert_eq!(
            cli.proxy_source(),
            ProxySource::List(vec!["10.0.0.1:80".to_string(), "10.0.0.2:80".to_string()])
        );

        let cli = parse(&["-d", "acme.com", "--proxy-file", "proxies.txt"]);
        assert_eq!(cli.proxy_source(), ProxySource::File(PathBuf::from("proxies.txt")));
    }

    #[test]
    fn test_conflicting_flags() {
        let result = Cli::try_parse_from(["linkscout", "-c", "-d", "acme.com"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["linkscout", "-d", "a.com", "--proxy", "1.1.1.1:80", "--proxy-file", "p.txt"]);
        assert!(result.is_err());
    }
}
