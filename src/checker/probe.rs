//! Single-link reachability probe
//!
//! A probe runs a small state machine per link:
//!
//! ```text
//! INIT --HEAD--> response ---------------------------> DONE (HEAD, retry 0)
//!   |
//!   +--transport failure--> GET_FALLBACK --response--> DONE (GET, retry 1)
//!                               |
//!                               +--transport failure--> DONE failed (GET, retry 1)
//! ```
//!
//! Any response with a status line ends the probe, including 4xx and 5xx.
//! Only transport failures (no status line) trigger the GET fallback.

use crate::checker::fetcher::{HopResponse, Transport, TransportFailure};
use crate::checker::parser::CandidateLink;
use crate::config::ProbeSettings;
use crate::url::{classify_link, LinkType};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// HTTP method used for the attempt that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProbeMethod {
    #[serde(rename = "HEAD")]
    Head,
    #[serde(rename = "GET")]
    Get,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Get => "GET",
        }
    }
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing one link
///
/// `is_working` always equals "status code present and in 200..400".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    /// The probed URL
    pub url: String,

    /// Final HTTP status, if any response was obtained
    pub status_code: Option<u16>,

    /// Whether the link counts as reachable
    pub is_working: bool,

    /// Seconds from probe start to completion, across both attempts
    #[serde(rename = "response_time")]
    pub response_time_secs: f64,

    /// Failure description; empty when a response was obtained
    pub error_message: String,

    /// Anchor text of the link
    pub anchor_text: String,

    /// Internal or external relative to the audited page
    pub link_type: LinkType,

    /// Every URL visited, start to final; empty unless a redirect happened
    pub redirect_chain: Vec<String>,

    /// URL of the final response, or the original URL on failure
    pub final_url: String,

    /// `Content-Type` of the final response
    pub content_type: String,

    /// Method of the attempt that ended the probe
    pub method_used: ProbeMethod,

    /// 1 when the GET fallback was taken
    pub retry_count: u32,
}

impl ProbeResult {
    /// Returns true for status codes that count as working (200..400)
    pub fn is_working_status(status_code: Option<u16>) -> bool {
        matches!(status_code, Some(code) if (200..400).contains(&code))
    }

    /// Returns true if the failure message reports an exceeded time budget
    pub fn is_timeout(&self) -> bool {
        self.error_message.to_lowercase().contains("timeout")
    }

    /// Builds the result for a probe that never completed normally
    ///
    /// Used at the concurrency gate when a probe task panics or is cancelled.
    pub fn aborted(candidate: &CandidateLink, link_type: LinkType, message: String) -> Self {
        Self {
            url: candidate.url.to_string(),
            status_code: None,
            is_working: false,
            response_time_secs: 0.0,
            error_message: message,
            anchor_text: candidate.anchor_text.clone(),
            link_type,
            redirect_chain: Vec::new(),
            final_url: candidate.url.to_string(),
            content_type: String::new(),
            method_used: ProbeMethod::Get,
            retry_count: 0,
        }
    }
}

/// A final response reached by one attempt, plus how it got there
#[derive(Debug)]
struct Landing {
    response: HopResponse,
    chain: Vec<Url>,
}

impl Landing {
    fn final_url(&self) -> &Url {
        // The chain always starts with the requested URL
        &self.chain[self.chain.len() - 1]
    }
}

/// Probes links for reachability
///
/// A probe holds only immutable configuration and a shared transport, so one
/// instance can serve every link of an audit concurrently.
pub struct LinkProbe<T> {
    transport: Arc<T>,
    page_host: String,
    timeout: Duration,
    max_redirects: usize,
}

impl<T: Transport> LinkProbe<T> {
    /// Creates a probe for links found on the page hosted at `page_host`
    pub fn new(transport: Arc<T>, page_host: impl Into<String>, settings: &ProbeSettings) -> Self {
        Self {
            transport,
            page_host: page_host.into(),
            timeout: settings.timeout(),
            max_redirects: settings.max_redirects,
        }
    }

    /// Classifies a URL relative to the audited page
    pub fn link_type(&self, url: &Url) -> LinkType {
        classify_link(url, &self.page_host)
    }

    /// Probes one link; never fails, every outcome becomes a [`ProbeResult`]
    pub async fn probe(&self, candidate: &CandidateLink) -> ProbeResult {
        let started = Instant::now();
        let link_type = self.link_type(&candidate.url);

        let head_failure = match self.attempt(ProbeMethod::Head, &candidate.url).await {
            Ok(landing) => {
                return self.completed(candidate, link_type, landing, ProbeMethod::Head, started)
            }
            Err(failure) => failure,
        };

        tracing::debug!(
            "HEAD failed for {}: {}; falling back to GET",
            candidate.url,
            head_failure
        );

        match self.attempt(ProbeMethod::Get, &candidate.url).await {
            Ok(landing) => self.completed(candidate, link_type, landing, ProbeMethod::Get, started),
            Err(failure) => {
                tracing::debug!("GET failed for {}: {}", candidate.url, failure);
                self.failed(candidate, link_type, failure, started)
            }
        }
    }

    /// Runs one attempt under the request timeout
    async fn attempt(&self, method: ProbeMethod, url: &Url) -> Result<Landing, TransportFailure> {
        match tokio::time::timeout(self.timeout, self.follow_redirects(method, url)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(TransportFailure::Timeout(format!(
                "{} {} exceeded {:.1}s",
                method,
                url,
                self.timeout.as_secs_f64()
            ))),
        }
    }

    /// Sends hops until a non-redirect response arrives
    async fn follow_redirects(
        &self,
        method: ProbeMethod,
        start: &Url,
    ) -> Result<Landing, TransportFailure> {
        let mut chain = vec![start.clone()];

        loop {
            let current = &chain[chain.len() - 1];
            let response = self.transport.send(method, current).await?;

            let Some(next) = response.redirect_target(current) else {
                return Ok(Landing { response, chain });
            };

            if chain.len() > self.max_redirects {
                return Err(TransportFailure::TooManyRedirects {
                    url: start.to_string(),
                    limit: self.max_redirects,
                });
            }

            if chain.contains(&next) {
                return Err(TransportFailure::RedirectLoop {
                    url: next.to_string(),
                });
            }

            tracing::trace!("{} {} redirected to {}", method, current, next);
            chain.push(next);
        }
    }

    fn completed(
        &self,
        candidate: &CandidateLink,
        link_type: LinkType,
        landing: Landing,
        method: ProbeMethod,
        started: Instant,
    ) -> ProbeResult {
        let status_code = Some(landing.response.status);
        let final_url = landing.final_url().to_string();
        let redirect_chain = if landing.chain.len() > 1 {
            landing.chain.iter().map(|u| u.to_string()).collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            "{} {} -> {} ({})",
            method,
            candidate.url,
            landing.response.status,
            link_type.as_str()
        );

        ProbeResult {
            url: candidate.url.to_string(),
            status_code,
            is_working: ProbeResult::is_working_status(status_code),
            response_time_secs: started.elapsed().as_secs_f64(),
            error_message: String::new(),
            anchor_text: candidate.anchor_text.clone(),
            link_type,
            redirect_chain,
            final_url,
            content_type: landing.response.content_type,
            method_used: method,
            retry_count: match method {
                ProbeMethod::Head => 0,
                ProbeMethod::Get => 1,
            },
        }
    }

    fn failed(
        &self,
        candidate: &CandidateLink,
        link_type: LinkType,
        failure: TransportFailure,
        started: Instant,
    ) -> ProbeResult {
        // A partial status is kept for reporting, but a failed probe is never
        // working; a 2xx/3xx partial status would contradict that.
        let status_code = failure
            .status()
            .filter(|code| !ProbeResult::is_working_status(Some(*code)));

        ProbeResult {
            url: candidate.url.to_string(),
            status_code,
            is_working: false,
            response_time_secs: started.elapsed().as_secs_f64(),
            error_message: failure.to_string(),
            anchor_text: candidate.anchor_text.clone(),
            link_type,
            redirect_chain: Vec::new(),
            final_url: candidate.url.to_string(),
            content_type: String::new(),
            method_used: ProbeMethod::Get,
            retry_count: 1,
        }
    }
}
