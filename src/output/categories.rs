//! Partitioning of probe results into report categories
//!
//! Categories overlap: a working link that redirected is listed under both
//! `working_links` and `redirects`, and every broken link is in
//! `broken_links` plus at most one cause category.

use crate::checker::ProbeResult;
use serde::Serialize;

/// A named bucket of probe results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    WorkingLinks,
    BrokenLinks,
    ClientErrors,
    ServerErrors,
    NetworkErrors,
    Redirects,
    Timeouts,
}

impl Category {
    /// All categories, in report order
    pub const ALL: [Category; 7] = [
        Category::WorkingLinks,
        Category::BrokenLinks,
        Category::ClientErrors,
        Category::ServerErrors,
        Category::NetworkErrors,
        Category::Redirects,
        Category::Timeouts,
    ];

    /// Key used in the JSON report
    pub fn key(&self) -> &'static str {
        match self {
            Self::WorkingLinks => "working_links",
            Self::BrokenLinks => "broken_links",
            Self::ClientErrors => "4xx_errors",
            Self::ServerErrors => "5xx_errors",
            Self::NetworkErrors => "network_errors",
            Self::Redirects => "redirects",
            Self::Timeouts => "timeouts",
        }
    }

    /// Heading used in the console report
    pub fn title(&self) -> &'static str {
        match self {
            Self::WorkingLinks => "WORKING LINKS",
            Self::BrokenLinks => "BROKEN LINKS",
            Self::ClientErrors => "4XX CLIENT ERRORS",
            Self::ServerErrors => "5XX SERVER ERRORS",
            Self::NetworkErrors => "NETWORK ERRORS",
            Self::Redirects => "REDIRECTS",
            Self::Timeouts => "TIMEOUTS",
        }
    }

    /// Returns every category a result belongs to
    ///
    /// Working results land in `WorkingLinks`, plus `Redirects` when a
    /// redirect chain was recorded. Broken results land in `BrokenLinks`,
    /// plus one cause:
    /// - `ClientErrors` / `ServerErrors` by status range when a status exists
    /// - `Timeouts` when the error message mentions "timeout" (any case)
    /// - `NetworkErrors` otherwise
    pub fn of(result: &ProbeResult) -> Vec<Category> {
        if result.is_working {
            let mut categories = vec![Self::WorkingLinks];
            if !result.redirect_chain.is_empty() {
                categories.push(Self::Redirects);
            }
            return categories;
        }

        let cause = match result.status_code {
            Some(400..=499) => Some(Self::ClientErrors),
            Some(500..=599) => Some(Self::ServerErrors),
            Some(_) => None,
            None if result.is_timeout() => Some(Self::Timeouts),
            None => Some(Self::NetworkErrors),
        };

        std::iter::once(Self::BrokenLinks).chain(cause).collect()
    }
}

/// Probe results grouped by category, each in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedResults {
    pub working_links: Vec<ProbeResult>,
    pub broken_links: Vec<ProbeResult>,
    #[serde(rename = "4xx_errors")]
    pub client_errors: Vec<ProbeResult>,
    #[serde(rename = "5xx_errors")]
    pub server_errors: Vec<ProbeResult>,
    pub network_errors: Vec<ProbeResult>,
    pub redirects: Vec<ProbeResult>,
    pub timeouts: Vec<ProbeResult>,
}

impl CategorizedResults {
    /// Returns the results of one category
    pub fn get(&self, category: Category) -> &[ProbeResult] {
        match category {
            Category::WorkingLinks => &self.working_links,
            Category::BrokenLinks => &self.broken_links,
            Category::ClientErrors => &self.client_errors,
            Category::ServerErrors => &self.server_errors,
            Category::NetworkErrors => &self.network_errors,
            Category::Redirects => &self.redirects,
            Category::Timeouts => &self.timeouts,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<ProbeResult> {
        match category {
            Category::WorkingLinks => &mut self.working_links,
            Category::BrokenLinks => &mut self.broken_links,
            Category::ClientErrors => &mut self.client_errors,
            Category::ServerErrors => &mut self.server_errors,
            Category::NetworkErrors => &mut self.network_errors,
            Category::Redirects => &mut self.redirects,
            Category::Timeouts => &mut self.timeouts,
        }
    }
}

/// Partitions probe results into categories
///
/// # Arguments
///
/// * `results` - All probe results of an audit
///
/// # Returns
///
/// A [`CategorizedResults`] where each bucket preserves input order
pub fn categorize(results: &[ProbeResult]) -> CategorizedResults {
    let mut categorized = CategorizedResults::default();

    for result in results {
        for category in Category::of(result) {
            categorized.bucket_mut(category).push(result.clone());
        }
    }

    categorized
}
