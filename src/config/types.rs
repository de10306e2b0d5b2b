use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Link-Audit
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Link probing behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// Maximum number of probes in flight at once
    #[serde(rename = "max-concurrent", default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: f64,

    /// Maximum number of redirect hops followed by one attempt
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Whether TLS certificates of probed sites are verified
    #[serde(rename = "verify-tls", default)]
    pub verify_tls: bool,
}

impl ProbeSettings {
    /// Returns the per-request timeout as a Duration
    ///
    /// Callers must validate the settings first. Here a NaN or non-positive
    /// timeout becomes zero and one too large for a Duration saturates.
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs > 0.0 {
            Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            verify_tls: false,
        }
    }
}

/// User-Agent selection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserAgentConfig {
    /// Fixed User-Agent string; takes precedence over the pool
    #[serde(default)]
    pub value: Option<String>,

    /// Candidate User-Agent strings, one picked at random per audit
    #[serde(default)]
    pub pool: Vec<String>,
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON report file, if one should be written
    #[serde(rename = "json-path", default)]
    pub json_path: Option<String>,

    /// Whether working links are listed in the console report
    #[serde(rename = "show-working", default)]
    pub show_working: bool,

    /// Maximum rows printed per category
    #[serde(rename = "max-display", default = "default_max_display")]
    pub max_display: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: None,
            show_working: false,
            max_display: default_max_display(),
        }
    }
}

fn default_max_concurrent() -> usize {
    10
}

fn default_timeout_secs() -> f64 {
    30.0
}

fn default_max_redirects() -> usize {
    10
}

fn default_max_display() -> usize {
    20
}
