//! HTML link extraction
//!
//! This module turns an HTML document into the ordered, deduplicated list of
//! links an audit will probe.

use crate::url::ensure_absolute;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Maximum anchor text length in characters before truncation
pub const MAX_ANCHOR_CHARS: usize = 100;

/// A link found on the audited page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Absolute URL after resolution against the page URL
    pub url: Url,

    /// Visible text, title, or raw href of the first anchor pointing here
    pub anchor_text: String,
}

/// Extracts the candidate links of an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document, in document order
///
/// **Exclude:**
/// - Empty hrefs (after trimming)
/// - `#fragment`, `javascript:`, `mailto:`, `tel:` hrefs
/// - Anything that does not resolve to an absolute URL with a host
///
/// Non-HTTP schemes such as `ftp:` are kept; the transport rejects them and
/// they are reported as network errors.
///
/// Links are deduplicated by their absolute URL string. The first occurrence
/// keeps its position and anchor text.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL used to resolve relative links
///
/// # Example
///
/// ```
/// use link_audit::checker::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/a">A</a><a href="https://other.test/b">B</a>"#;
/// let base_url = Url::parse("https://site.test/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].url.as_str(), "https://site.test/a");
/// assert_eq!(links[0].anchor_text, "A");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    for element in document.select(&a_selector) {
        let Some(raw_href) = element.value().attr("href") else {
            continue;
        };
        let href = raw_href.trim();

        let Some(absolute_url) = resolve_link(href, base_url) else {
            continue;
        };

        if !seen.insert(absolute_url.as_str().to_string()) {
            continue;
        }

        links.push(CandidateLink {
            anchor_text: anchor_text(&element, href),
            url: absolute_url,
        });
    }

    tracing::debug!("Extracted {} unique links from {}", links.len(), base_url);
    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    if href.is_empty() {
        return None;
    }

    if href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    ensure_absolute(&absolute_url).ok()?;
    Some(absolute_url)
}

/// Picks the anchor text: visible text, then `title`, then the href itself
///
/// The visible text is trimmed and every inner run of whitespace (including
/// line breaks from nested markup) is collapsed to a single space.
fn anchor_text(element: &ElementRef<'_>, href: &str) -> String {
    let text = element.text().collect::<String>();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let chosen = if !text.is_empty() {
        text
    } else {
        match element.value().attr("title").map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => href.to_string(),
        }
    };

    truncate_anchor(chosen)
}

/// Cuts anchor text to [`MAX_ANCHOR_CHARS`] characters plus `...`
pub fn truncate_anchor(text: String) -> String {
    if text.chars().count() <= MAX_ANCHOR_CHARS {
        return text;
    }

    let mut truncated: String = text.chars().take(MAX_ANCHOR_CHARS).collect();
    truncated.push_str("...");
    truncated
}
