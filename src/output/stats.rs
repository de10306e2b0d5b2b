//! Summary statistics over probe results
//!
//! Statistics are a pure fold over the full result set: the outcome does not
//! depend on the order in which probes completed.

use crate::checker::ProbeResult;
use crate::output::categories::Category;
use crate::url::LinkType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Audit statistics summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of links probed
    pub total_links: usize,

    /// Links whose final status was in 200..400
    pub working_links: usize,

    /// `total_links - working_links`
    pub broken_links: usize,

    /// Links on the audited page's host
    pub internal_links: usize,

    /// Links on any other host
    pub external_links: usize,

    /// Percentage of working links, 0 for an empty audit
    pub success_rate: f64,

    /// Mean response time in seconds over results with a non-zero time
    pub avg_response_time: f64,

    /// Status code -> count, over results that have a status code
    pub status_code_distribution: BTreeMap<u16, usize>,

    /// Working links that went through at least one redirect
    pub redirects: usize,

    /// Broken links that timed out
    pub timeouts: usize,

    /// Broken links with no response and no timeout
    pub network_errors: usize,
}

/// Computes statistics for a set of probe results
///
/// # Arguments
///
/// * `results` - All probe results of an audit
///
/// # Returns
///
/// The [`Statistics`] summary; all zeros for an empty slice
pub fn compute_statistics(results: &[ProbeResult]) -> Statistics {
    let mut stats = Statistics {
        total_links: results.len(),
        ..Statistics::default()
    };

    let mut timed_total = 0.0;
    let mut timed_count = 0usize;

    for result in results {
        if result.is_working {
            stats.working_links += 1;
        }

        match result.link_type {
            LinkType::Internal => stats.internal_links += 1,
            LinkType::External => stats.external_links += 1,
        }

        if result.response_time_secs > 0.0 {
            timed_total += result.response_time_secs;
            timed_count += 1;
        }

        if let Some(code) = result.status_code {
            *stats.status_code_distribution.entry(code).or_insert(0) += 1;
        }

        for category in Category::of(result) {
            match category {
                Category::Redirects => stats.redirects += 1,
                Category::Timeouts => stats.timeouts += 1,
                Category::NetworkErrors => stats.network_errors += 1,
                _ => {}
            }
        }
    }

    stats.broken_links = stats.total_links - stats.working_links;

    if stats.total_links > 0 {
        stats.success_rate = stats.working_links as f64 / stats.total_links as f64 * 100.0;
    }

    if timed_count > 0 {
        stats.avg_response_time = timed_total / timed_count as f64;
    }

    stats
}
