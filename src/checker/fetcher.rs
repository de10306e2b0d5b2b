//! HTTP fetcher implementation
//!
//! This module handles all HTTP traffic of an audit:
//! - Building HTTP clients with the resolved User-Agent and default headers
//! - The [`Transport`] seam used by link probes (one hop, no redirects)
//! - Error classification into [`TransportFailure`]
//! - Fetching the audited page itself

use crate::checker::probe::ProbeMethod;
use crate::config::ProbeSettings;
use crate::AuditError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, LOCATION};
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Upper bound for the TCP connect phase of a request
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response of a single HTTP hop
///
/// Redirects are not followed by the transport; a 3xx comes back as-is with
/// its `Location` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopResponse {
    /// HTTP status code
    pub status: u16,

    /// Raw `Location` header, if present
    pub location: Option<String>,

    /// `Content-Type` header value, empty when absent
    pub content_type: String,
}

impl HopResponse {
    /// Returns the URL this response redirects to, if it is a followable redirect
    ///
    /// The `Location` header is resolved against `current`. A redirect status
    /// without a usable `Location` is treated as a final response.
    pub fn redirect_target(&self, current: &Url) -> Option<Url> {
        if !matches!(self.status, 301 | 302 | 303 | 307 | 308) {
            return None;
        }

        let location = self.location.as_deref()?.trim();
        if location.is_empty() {
            return None;
        }

        current.join(location).ok()
    }
}

/// Transport-level failure: no usable final response was obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// The request exceeded its time budget
    #[error("timeout: {0}")]
    Timeout(String),

    /// DNS resolution or TCP connection failed
    #[error("connection error: {0}")]
    Connect(String),

    /// TLS handshake or certificate failure
    #[error("TLS error: {0}")]
    Tls(String),

    /// More redirect hops than allowed
    #[error("too many redirects (limit {limit}) starting at {url}")]
    TooManyRedirects { url: String, limit: usize },

    /// A redirect pointed back to a URL already in the chain
    #[error("redirect loop detected at {url}")]
    RedirectLoop { url: String },

    /// Any other request failure, possibly carrying a partial status
    #[error("{message}")]
    Request {
        message: String,
        status: Option<u16>,
    },
}

impl TransportFailure {
    /// Status code of a partial HTTP response attached to the failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Classifies a reqwest error
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let message = error_chain(error);
        // The URL itself may contain "ssl" or "tls"
        let detail = match error.url() {
            Some(url) => message.replace(url.as_str(), ""),
            None => message.clone(),
        };

        if error.is_timeout() {
            Self::Timeout(message)
        } else if is_tls_message(&detail) {
            Self::Tls(message)
        } else if error.is_connect() {
            Self::Connect(message)
        } else {
            Self::Request {
                message,
                status: error.status().map(|s| s.as_u16()),
            }
        }
    }
}

/// Joins an error with all of its sources into one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn is_tls_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl")
}

/// Sends single HTTP hops for link probes
///
/// Implementations must not follow redirects; the probe does that itself so
/// it can record the redirect chain.
pub trait Transport: Send + Sync + 'static {
    /// Sends one request and returns its status line and relevant headers
    fn send(
        &self,
        method: ProbeMethod,
        url: &Url,
    ) -> impl Future<Output = Result<HopResponse, TransportFailure>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `settings` - Probe settings (timeout, certificate verification)
/// * `user_agent` - The User-Agent resolved for this audit
/// * `redirect` - Redirect policy; probes use `Policy::none()`
///
/// # Example
///
/// ```no_run
/// use link_audit::checker::build_http_client;
/// use link_audit::config::ProbeSettings;
/// use reqwest::redirect::Policy;
///
/// let settings = ProbeSettings::default();
/// let client = build_http_client(&settings, "AuditBot/1.0", Policy::none()).unwrap();
/// ```
pub fn build_http_client(
    settings: &ProbeSettings,
    user_agent: &str,
    redirect: Policy,
) -> Result<Client, reqwest::Error> {
    let timeout = settings.timeout();

    Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers())
        .timeout(timeout)
        .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
        .redirect(redirect)
        .danger_accept_invalid_certs(!settings.verify_tls)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Browser-like headers sent with every request
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    headers
}

/// [`Transport`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport that never follows redirects
    pub fn new(settings: &ProbeSettings, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = build_http_client(settings, user_agent, Policy::none())?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, method: ProbeMethod, url: &Url) -> Result<HopResponse, TransportFailure> {
        let request = match method {
            ProbeMethod::Head => self.client.head(url.as_str()),
            ProbeMethod::Get => self.client.get(url.as_str()),
        };

        let response = request
            .send()
            .await
            .map_err(|e| TransportFailure::from_reqwest(&e))?;

        let headers = response.headers();
        let location = headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        Ok(HopResponse {
            status: response.status().as_u16(),
            location,
            content_type,
        })
    }
}

/// The audited page as fetched over HTTP
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// Page body
    pub body: String,

    /// Wall-clock seconds spent fetching the page
    pub load_time_secs: f64,
}

/// Fetches the page whose links will be audited
///
/// Unlike link probes, a failure here aborts the audit: a transport error or
/// a non-2xx status is returned as an error.
///
/// # Arguments
///
/// * `client` - A client built with a redirect-following policy
/// * `url` - The page URL
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, AuditError> {
    let started = Instant::now();

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|source| AuditError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuditError::PageStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let body = response.text().await.map_err(|source| AuditError::Http {
        url: url.to_string(),
        source,
    })?;

    let load_time_secs = started.elapsed().as_secs_f64();
    tracing::info!(
        "Fetched {} ({} bytes) in {:.2}s",
        final_url,
        body.len(),
        load_time_secs
    );

    Ok(FetchedPage {
        final_url,
        body,
        load_time_secs,
    })
}
