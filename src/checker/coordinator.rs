//! Audit coordinator - the public entry point of the link checker
//!
//! An [`Auditor`] takes an HTML document and the URL it was served from, then:
//! - Extracts and deduplicates candidate links
//! - Probes them through the concurrency gate
//! - Aggregates the results into statistics and categories

use crate::checker::fetcher::{HttpTransport, Transport};
use crate::checker::gate::ConcurrencyGate;
use crate::checker::parser::{extract_links, CandidateLink};
use crate::checker::probe::{LinkProbe, ProbeResult};
use crate::config::{validate_probe_settings, ProbeSettings};
use crate::output::{categorize, compute_statistics, CategorizedResults, Statistics};
use crate::url::{extract_host, parse_page_url};
use crate::{AuditError, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Timestamp format of audit reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Full outcome of one audit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// The audited page URL
    pub url: String,

    /// UTC time the audit finished
    pub timestamp: String,

    /// One result per candidate link, in document order
    #[serde(rename = "link_results")]
    pub results: Vec<ProbeResult>,

    pub statistics: Statistics,

    #[serde(rename = "errors_by_category")]
    pub categorized: CategorizedResults,
}

/// Runs link audits over a shared transport
pub struct Auditor<T> {
    transport: Arc<T>,
    settings: ProbeSettings,
}

fn check_settings(settings: &ProbeSettings) -> Result<()> {
    validate_probe_settings(settings).map_err(|e| AuditError::InvalidInput(e.to_string()))
}

impl Auditor<HttpTransport> {
    /// Creates an auditor probing over HTTP
    ///
    /// # Arguments
    ///
    /// * `settings` - Probe settings
    /// * `user_agent` - User-Agent sent with every probe, resolved once per run
    pub fn with_http(settings: ProbeSettings, user_agent: &str) -> Result<Self> {
        check_settings(&settings)?;
        let transport = HttpTransport::new(&settings, user_agent)?;
        Self::new(Arc::new(transport), settings)
    }
}

impl<T: Transport> Auditor<T> {
    /// Creates an auditor over any transport
    ///
    /// # Returns
    ///
    /// * `Ok(Auditor)` - Settings are usable
    /// * `Err(AuditError::InvalidInput)` - Concurrency outside
    ///   `1..=Semaphore::MAX_PERMITS`, a timeout that is not a positive
    ///   representable duration, or an out-of-range redirect limit
    pub fn new(transport: Arc<T>, settings: ProbeSettings) -> Result<Self> {
        check_settings(&settings)?;
        Ok(Self {
            transport,
            settings,
        })
    }

    /// Audits every link of an HTML document
    ///
    /// Individual link failures never make this fail; they are recorded in
    /// the report. Only an unusable `base_url` is an error.
    ///
    /// # Arguments
    ///
    /// * `html` - The page body
    /// * `base_url` - The URL the page was requested from
    pub async fn audit(&self, html: &str, base_url: &str) -> Result<AuditReport> {
        let page_url = parse_page_url(base_url)?;
        let candidates = extract_links(html, &page_url);
        let results = self.check_links(&page_url, &candidates).await?;

        let statistics = compute_statistics(&results);
        let categorized = categorize(&results);

        Ok(AuditReport {
            url: page_url.to_string(),
            timestamp: chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            results,
            statistics,
            categorized,
        })
    }

    /// Probes already-extracted links of the page at `page_url`
    ///
    /// # Returns
    ///
    /// One result per candidate, in candidate order
    pub async fn check_links(
        &self,
        page_url: &Url,
        candidates: &[CandidateLink],
    ) -> Result<Vec<ProbeResult>> {
        let page_host = extract_host(page_url).ok_or_else(|| {
            AuditError::InvalidInput(format!("page URL has no host: {}", page_url))
        })?;

        let started = Instant::now();
        let probe = Arc::new(LinkProbe::new(
            Arc::clone(&self.transport),
            page_host,
            &self.settings,
        ));
        let gate = ConcurrencyGate::new(self.settings.max_concurrent);
        let results = gate.run(probe, candidates).await;

        let working = results.iter().filter(|r| r.is_working).count();
        tracing::info!(
            "Checked {} links on {} in {:.2}s: {} working, {} broken",
            results.len(),
            page_url,
            started.elapsed().as_secs_f64(),
            working,
            results.len() - working
        );

        Ok(results)
    }
}
