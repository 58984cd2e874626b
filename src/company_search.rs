use log::{info, warn};
use crate::cancel::CancelToken;
use crate::extractor::extract_links;
use crate::profile::parse_company;
use crate::search_engine::EngineSpec;
use crate::transport::{status_code, Transport};

/// Resolves a web domain to the organization's display name.
///
/// One request, first page only, first qualifying company anchor wins.
pub struct CompanySearch<'a> {
    engine: &'a EngineSpec,
    domain: &'a str,
    transport: &'a Transport,
    token: CancelToken,
}

impl<'a> CompanySearch<'a> {
    pub fn new(engine: &'a EngineSpec, domain: &'a str, transport: &'a Transport, token: CancelToken) -> Self {
        CompanySearch { engine, domain, transport, token }
    }

    pub fn search(&self) -> Option<String> {
        let Some(url) = self.engine.company_url(self.domain) else {
            warn!("Search engine '{}' does not support company lookup", self.engine.name());
            return None;
        };

        if self.token.is_cancelled() {
            warn!("Key event detected, exiting search...");
            return None;
        }
        let page = self.transport.fetch(&url);
        let status = status_code(page.as_ref());
        let page = match page {
            Some(page) if page.is_success() => page,
            _ => {
                warn!("None 200 response, exiting search ({})", status);
                return None;
            }
        };

        let company = extract_links(&page.body).iter().find_map(parse_company);
        match &company {
            Some(name) => info!("Company name for {}: {}", self.domain, name),
            None => warn!("No company name found for domain: {}", self.domain),
        }
        company
    }
}
