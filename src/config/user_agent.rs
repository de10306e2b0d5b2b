use crate::config::types::UserAgentConfig;

/// Browser User-Agent strings used when the configuration names none
const BROWSER_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

impl UserAgentConfig {
    /// Picks the User-Agent for one audit
    ///
    /// Resolution order:
    /// 1. The fixed `value`, if set
    /// 2. A random entry of `pool`, if non-empty
    /// 3. A random built-in browser string
    ///
    /// The result is meant to be resolved once and then carried as immutable
    /// configuration by the transport.
    pub fn resolve(&self) -> String {
        if let Some(value) = &self.value {
            return value.clone();
        }

        if !self.pool.is_empty() {
            return self.pool[fastrand::usize(..self.pool.len())].clone();
        }

        BROWSER_USER_AGENTS[fastrand::usize(..BROWSER_USER_AGENTS.len())].to_string()
    }
}
