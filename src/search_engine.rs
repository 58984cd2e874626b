//! Search engine table.
//!
//! Each engine is a row of URL templates with two substitution points:
//! `{target}` (percent-encoded) and `{offset}` (the running result count).
//! Adding an engine means adding a row to [`ENGINES`]; the search loop never
//! needs to change.

use log::debug;

pub const TARGET_PLACEHOLDER: &str = "{target}";
pub const OFFSET_PLACEHOLDER: &str = "{offset}";

/// Engines queried when the caller does not choose.
pub const DEFAULT_ENGINES: [&str; 2] = ["google", "bing"];

/// Engine used for domain lookups when none of the selected engines has a company template.
pub const DEFAULT_COMPANY_ENGINE: &str = "google";

struct EngineRow {
    name: &'static str,
    query: &'static str,
    company: Option<&'static str>,
}

// Google pages 100 results at a time and takes the result count as `start`;
// Bing takes a raw `first` offset.
const ENGINES: &[EngineRow] = &[
    EngineRow {
        name: "google",
        query: "https://www.google.com/search?q=site:linkedin.com/in+%22{target}%22&num=100&start={offset}",
        company: Some("https://www.google.com/search?q=site:linkedin.com+intext:%22{target}%22&num=1"),
    },
    EngineRow {
        name: "bing",
        query: "http://www.bing.com/search?q=%22{target}%22+site:linkedin.com/in&first={offset}",
        company: None,
    },
];

/// A resolved engine: its identifier plus the templates used to build request URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSpec {
    name: String,
    query_template: String,
    company_template: Option<String>,
}

impl EngineSpec {
    /// Builds an engine outside the built-in table, e.g. a self-hosted mirror.
    pub fn new(name: &str, query_template: &str) -> Self {
        EngineSpec {
            name: name.to_string(),
            query_template: query_template.to_string(),
            company_template: None,
        }
    }

    pub fn with_company_template(mut self, template: &str) -> Self {
        self.company_template = Some(template.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supports_company_lookup(&self) -> bool {
        self.company_template.is_some()
    }

    /// URL for the page starting at `offset` results.
    pub fn query_url(&self, target: &str, offset: usize) -> String {
        fill(&self.query_template, target, offset)
    }

    /// URL for a domain-to-company lookup; always the first page.
    pub fn company_url(&self, target: &str) -> Option<String> {
        self.company_template
            .as_deref()
            .map(|template| fill(template, target, 0))
    }
}

fn fill(template: &str, target: &str, offset: usize) -> String {
    template
        .replace(TARGET_PLACEHOLDER, &urlencoding::encode(target))
        .replace(OFFSET_PLACEHOLDER, &offset.to_string())
}

/// Looks up a built-in engine by identifier (case-insensitive).
pub fn lookup(name: &str) -> Option<EngineSpec> {
    let wanted = name.trim().to_lowercase();
    ENGINES.iter().find(|row| row.name == wanted).map(|row| EngineSpec {
        name: row.name.to_string(),
        query_template: row.query.to_string(),
        company_template: row.company.map(str::to_string),
    })
}

/// Resolves a user-supplied engine list, dropping unknown identifiers.
pub fn resolve(names: &[String]) -> Vec<EngineSpec> {
    names
        .iter()
        .filter_map(|name| {
            let engine = lookup(name);
            if engine.is_none() {
                debug!("Skipping unknown search engine '{}' (known: {})", name, known_engines().join(", "));
            }
            engine
        })
        .collect()
}

/// First selected engine able to resolve a domain, falling back to
/// [`DEFAULT_COMPANY_ENGINE`] when the selection has none.
pub fn company_engine(selected: &[EngineSpec]) -> Option<EngineSpec> {
    if let Some(engine) = selected.iter().find(|e| e.supports_company_lookup()) {
        return Some(engine.clone());
    }
    debug!("No selected engine supports company lookup, using {}", DEFAULT_COMPANY_ENGINE);
    lookup(DEFAULT_COMPANY_ENGINE)
}

pub fn known_engines() -> Vec<&'static str> {
    ENGINES.iter().map(|row| row.name).collect()
}
