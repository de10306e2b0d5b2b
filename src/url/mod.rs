//! URL handling module for Link-Audit
//!
//! This module provides host extraction, URL validity checks, and the
//! internal/external classification of links.

mod domain;
mod validate;

use serde::Serialize;
use url::Url;

// Re-export main functions
pub use domain::extract_host;
pub use validate::{ensure_absolute, ensure_probeable, parse_page_url};

/// Whether a link stays on the audited page's host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Same host as the audited page
    Internal,
    /// Any other host
    External,
}

impl LinkType {
    /// Returns the lowercase label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// Classifies a link against the audited page's host
///
/// A link is internal iff its host equals `page_host` exactly (ports and
/// schemes are ignored). Subdomains count as external.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_audit::url::{classify_link, LinkType};
///
/// let link = Url::parse("https://site.test/a").unwrap();
/// assert_eq!(classify_link(&link, "site.test"), LinkType::Internal);
///
/// let link = Url::parse("https://blog.site.test/a").unwrap();
/// assert_eq!(classify_link(&link, "site.test"), LinkType::External);
/// ```
pub fn classify_link(link: &Url, page_host: &str) -> LinkType {
    match extract_host(link) {
        Some(host) if host == page_host => LinkType::Internal,
        _ => LinkType::External,
    }
}
