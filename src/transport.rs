use std::time::Duration;
use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::{Proxy, StatusCode};
use log::{debug, warn};
use thiserror::Error;

/// Cookie that keeps Google from answering with a consent interstitial.
pub const CONSENT_COOKIE: &str = "CONSENT=YES";

const USER_AGENTS: &[&str] = &[
    // Chrome
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Safari/537.36",
    // Firefox
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13.4; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:126.0) Gecko/20100101 Firefox/126.0",
    // Safari
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPad; CPU OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
    // Edge
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Safari/537.36 Edg/125.0.2535.67",
    // Android
    "Mozilla/5.0 (Linux; Android 13; SM-G991B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Mobile Safari/537.36",
    "Mozilla/5.0 (Linux; Android 14; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Mobile Safari/537.36",
    "Mozilla/5.0 (Android 14; Mobile; rv:126.0) Gecko/126.0 Firefox/126.0",
    "Mozilla/5.0 (Linux; Android 13; SM-G998U) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/25.0 Chrome/125.0.6422.113 Mobile Safari/537.36",
    // Brave, Opera, Vivaldi
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Safari/537.36 Brave/125.1.63.113",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Safari/537.36 OPR/110.0.5100.67",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.113 Safari/537.36 Vivaldi/6.7.3329.25",
    // Tor Browser
    "Mozilla/5.0 (Windows NT 10.0; rv:102.0) Gecko/20100101 Firefox/102.0",
];

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid proxy '{proxy}': {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A fetched result page.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: StatusCode,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Status code reported for a request that got no response at all.
pub fn status_code(page: Option<&Page>) -> u16 {
    page.map(|p| p.status.as_u16()).unwrap_or(0)
}

/// Outbound HTTP for search queries.
///
/// Holds one client per proxy (or a single direct client) and picks one at
/// random for every request. Certificate validation is off: engines are not
/// pinned and a bad certificate must not abort a run.
pub struct Transport {
    clients: Vec<Client>,
}

impl Transport {
    pub fn new(timeout: Duration, proxies: &[String]) -> Result<Self, TransportError> {
        let clients = if proxies.is_empty() {
            vec![Self::build_client(timeout, None)?]
        } else {
            proxies
                .iter()
                .map(|proxy| {
                    let parsed = Proxy::all(proxy_url(proxy)).map_err(|source| TransportError::InvalidProxy {
                        proxy: proxy.clone(),
                        source,
                    })?;
                    Self::build_client(timeout, Some(parsed))
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(Transport { clients })
    }

    fn build_client(timeout: Duration, proxy: Option<Proxy>) -> Result<Client, TransportError> {
        let mut builder = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .danger_accept_invalid_certs(true);
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }
        Ok(builder.build()?)
    }

    /// Issues one GET. Every transport failure collapses to `None`; nothing is retried here.
    pub fn fetch(&self, url: &str) -> Option<Page> {
        let client = self.clients.choose(&mut rand::thread_rng())?;
        let result = client
            .get(url)
            .header(USER_AGENT, random_user_agent())
            .header(COOKIE, CONSENT_COOKIE)
            .send()
            .and_then(|resp| {
                let status = resp.status();
                resp.text().map(|body| Page { status, body })
            });

        match result {
            Ok(page) => Some(page),
            Err(e) if e.is_redirect() => {
                warn!("Proxy Error: {}", e);
                None
            }
            Err(e) => {
                debug!("Request to {} failed: {}", url, e);
                None
            }
        }
    }
}

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Bare `host:port` entries are treated as HTTP proxies.
fn proxy_url(proxy: &str) -> String {
    if proxy.contains("://") {
        proxy.to_string()
    } else {
        format!("http://{}", proxy)
    }
}
