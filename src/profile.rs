//! Turning search-result anchors into identity records.
//!
//! Result snippets for an indexed profile look like
//! `"Jane Doe - Staff Engineer - Acme | LinkedIn"`. The splitting rules below
//! depend on that punctuation and are kept exactly as observed.

use deunicode::deunicode;
use log::debug;
use url::Url;
use crate::extractor::Anchor;

/// Root domain of the indexed site.
pub const SITE_DOMAIN: &str = "linkedin.com";
/// Path marker of a personal profile (`/in/<slug>`).
pub const PROFILE_MARKER: &str = "/in/";
/// Path marker of a company page (`/company/<slug>`).
pub const COMPANY_MARKER: &str = "/company/";
/// Title used when the snippet has no hyphen-separated title.
pub const NO_TITLE: &str = "N/A";

const PIPE: &str = "|";
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileRecord {
    /// Lower-cased profile URL.
    pub url: String,
    /// Snippet text up to the first pipe or ellipsis, transliterated to ASCII.
    pub text: String,
    pub name: String,
    pub title: String,
}

/// Which path convention an anchor must follow to qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Profile,
    Company,
}

impl LinkKind {
    fn marker(self) -> &'static str {
        match self {
            LinkKind::Profile => PROFILE_MARKER,
            LinkKind::Company => COMPANY_MARKER,
        }
    }
}

/// True when `url` is on the indexed site and follows the `kind` path convention.
pub fn qualifies(url: &str, kind: LinkKind) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let on_site = parsed
        .host_str()
        .is_some_and(|host| host.to_lowercase().ends_with(SITE_DOMAIN));

    on_site && parsed.path().to_lowercase().contains(kind.marker())
}

/// Builds a record from one anchor, or `None` when the anchor is not a profile result.
///
/// A returned record can still be malformed; [`is_malformed`] is applied by
/// the result set on acceptance.
pub fn parse_profile(href: &str, anchor_text: &str) -> Option<ProfileRecord> {
    let url = href.to_lowercase();
    if !qualifies(&url, LinkKind::Profile) {
        return None;
    }

    let text = deunicode(truncate_snippet(anchor_text));
    let name = parse_name(&text);
    if name.is_empty() {
        debug!("Skipping {}: no name in {:?}", url, anchor_text);
        return None;
    }
    let title = parse_title(&text).unwrap_or_else(|| NO_TITLE.to_string());

    Some(ProfileRecord { url, text, name, title })
}

/// Company display name from a qualifying company-page anchor.
pub fn parse_company(anchor: &Anchor) -> Option<String> {
    let url = anchor.href.as_deref()?.to_lowercase();
    if !qualifies(&url, LinkKind::Company) {
        return None;
    }
    anchor
        .heading
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Guard against anchors whose visible text is the site itself rather than a person.
pub fn is_malformed(record: &ProfileRecord) -> bool {
    record.name.is_empty() || record.name.contains(SITE_DOMAIN)
}

/// Drops trailing decoration: everything from the first pipe, then from the first ellipsis.
fn truncate_snippet(text: &str) -> &str {
    let before_pipe = text.split(PIPE).next().unwrap_or_default();
    before_pipe.split(ELLIPSIS).next().unwrap_or_default()
}

fn parse_name(text: &str) -> String {
    let left = text.split('-').next().unwrap_or_default().trim();
    deunicode(left).to_lowercase()
}

/// The segment between the first and second hyphen, cut at any embedded link.
fn parse_title(text: &str) -> Option<String> {
    let segment = text.split('-').nth(1)?;
    let segment = segment.split("https:").next().unwrap_or_default();
    let segment = segment.split(ELLIPSIS).next().unwrap_or_default();
    let segment = segment.split(PIPE).next().unwrap_or_default();
    Some(segment.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_URL: &str = "https://www.linkedin.com/in/john-smith-123";

    #[test]
    fn test_splits_name_and_title() {
        let record = parse_profile(PROFILE_URL, "John Smith - Senior Engineer https://www.linkedin.com/in/john").unwrap();
        assert_eq!(record.name, "john smith");
        assert_eq!(record.title, "Senior Engineer");
        assert_eq!(record.url, PROFILE_URL);
    }

    #[test]
    fn test_lowercase_snippet_from_docs() {
        let record = parse_profile(PROFILE_URL, "john smith - senior engineer https://...").unwrap();
        assert_eq!(record.name, "john smith");
        assert_eq!(record.title, "senior engineer");
    }

    #[test]
    fn test_title_stops_at_second_hyphen() {
        let record = parse_profile(PROFILE_URL, "Jane Doe - Staff Engineer - Acme Corp | LinkedIn").unwrap();
        assert_eq!(record.name, "jane doe");
        assert_eq!(record.title, "Staff Engineer");
        assert_eq!(record.text, "Jane Doe - Staff Engineer - Acme Corp ");
    }

    #[test]
    fn test_no_hyphen_yields_placeholder_title() {
        let record = parse_profile(PROFILE_URL, "Jane Doe").unwrap();
        assert_eq!(record.name, "jane doe");
        assert_eq!(record.title, NO_TITLE);
    }

    #[test]
    fn test_ellipsis_truncates_before_split() {
        let record = parse_profile(PROFILE_URL, "Jane Doe ... - Engineer").unwrap();
        assert_eq!(record.name, "jane doe");
        assert_eq!(record.title, NO_TITLE);
        assert_eq!(record.text, "Jane Doe ");
    }

    #[test]
    fn test_transliterates_name() {
        let record = parse_profile(PROFILE_URL, "José Müller - Ingeniero").unwrap();
        assert_eq!(record.name, "jose muller");
        assert_eq!(record.text, "Jose Muller - Ingeniero");
    }

    #[test]
    fn test_url_is_lowercased() {
        let record = parse_profile("https://WWW.LinkedIn.com/in/Jane-Doe", "Jane Doe - CTO").unwrap();
        assert_eq!(record.url, "https://www.linkedin.com/in/jane-doe");
    }

    #[test]
    fn test_country_subdomain_qualifies() {
        assert!(parse_profile("https://uk.linkedin.com/in/jane", "Jane Doe - CTO").is_some());
    }

    #[test]
    fn test_rejects_other_hosts_and_paths() {
        assert!(parse_profile("https://example.com/in/jane", "Jane Doe - CTO").is_none());
        assert!(parse_profile("https://www.linkedin.com/company/acme", "Acme - Company").is_none());
        assert!(parse_profile("/url?q=https://www.linkedin.com/in/jane", "Jane Doe - CTO").is_none());
        assert!(parse_profile("https://linkedin.com.evil.test/in/jane", "Jane Doe - CTO").is_none());
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(parse_profile(PROFILE_URL, " - Engineer").is_none());
        assert!(parse_profile(PROFILE_URL, "| LinkedIn").is_none());
    }

    #[test]
    fn test_site_name_anchor_is_malformed() {
        let record = parse_profile(PROFILE_URL, "linkedin.com").unwrap();
        assert!(is_malformed(&record));

        let good = parse_profile(PROFILE_URL, "Jane Doe - CTO").unwrap();
        assert!(!is_malformed(&good));
    }

    #[test]
    fn test_company_heading() {
        let anchor = Anchor {
            href: Some("https://www.linkedin.com/company/acme-corp/".to_string()),
            text: "Acme Corp | LinkedIn".to_string(),
            heading: Some("  Acme Corp \n".to_string()),
        };
        assert_eq!(parse_company(&anchor).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_company_requires_heading_and_path() {
        let no_heading = Anchor {
            href: Some("https://www.linkedin.com/company/acme".to_string()),
            text: "Acme".to_string(),
            heading: None,
        };
        assert_eq!(parse_company(&no_heading), None);

        let profile = Anchor {
            href: Some(PROFILE_URL.to_string()),
            text: "Jane".to_string(),
            heading: Some("Jane Doe".to_string()),
        };
        assert_eq!(parse_company(&profile), None);

        let no_href = Anchor { href: None, text: String::new(), heading: Some("Acme".to_string()) };
        assert_eq!(parse_company(&no_href), None);
    }
}
