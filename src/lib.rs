//! Link-Audit: concurrent outbound link validation for a single web page
//!
//! This crate extracts the hyperlinks of an HTML document, probes each one for
//! reachability under a concurrency ceiling (HEAD first, GET as fallback), and
//! aggregates the outcomes into statistics and report categories.

pub mod checker;
pub mod config;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Audit operations
///
/// Per-link failures never show up here: they are recorded in
/// [`checker::ProbeResult`]. This type only covers hard failures of the audit
/// as a whole.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Page {url} returned HTTP {status}")]
    PageStatus { url: String, status: u16 },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Link-Audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use checker::{AuditReport, Auditor, CandidateLink, ProbeMethod, ProbeResult};
pub use config::Config;
pub use output::{CategorizedResults, Category, Statistics};
pub use url::{classify_link, LinkType};
