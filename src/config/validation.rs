use crate::config::types::{Config, OutputConfig, ProbeSettings, UserAgentConfig};
use crate::ConfigError;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Upper bound for `max-redirects`
const MAX_REDIRECT_LIMIT: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_probe_settings(&config.probe)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates probe settings
pub fn validate_probe_settings(settings: &ProbeSettings) -> Result<(), ConfigError> {
    if settings.max_concurrent < 1 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent must be >= 1, got {}",
            settings.max_concurrent
        )));
    }

    if settings.max_concurrent > Semaphore::MAX_PERMITS {
        return Err(ConfigError::Validation(format!(
            "max_concurrent must be <= {}, got {}",
            Semaphore::MAX_PERMITS,
            settings.max_concurrent
        )));
    }

    if !settings.timeout_secs.is_finite() || settings.timeout_secs <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be a positive number, got {}",
            settings.timeout_secs
        )));
    }

    if Duration::try_from_secs_f64(settings.timeout_secs).is_err() {
        return Err(ConfigError::Validation(format!(
            "timeout_secs is too large, got {}",
            settings.timeout_secs
        )));
    }

    if settings.max_redirects < 1 || settings.max_redirects > MAX_REDIRECT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be between 1 and {}, got {}",
            MAX_REDIRECT_LIMIT, settings.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if let Some(value) = &config.value {
        validate_header_value(value)?;
    }

    for candidate in &config.pool {
        validate_header_value(candidate)?;
    }

    Ok(())
}

/// A User-Agent must be non-empty and free of control characters
fn validate_header_value(value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    if value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user agent contains control characters: {:?}",
            value
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.json_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "json_path cannot be empty".to_string(),
            ));
        }
    }

    if config.max_display < 1 {
        return Err(ConfigError::Validation(format!(
            "max_display must be >= 1, got {}",
            config.max_display
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(max_concurrent: usize, timeout_secs: f64, max_redirects: usize) -> ProbeSettings {
        ProbeSettings {
            max_concurrent,
            timeout_secs,
            max_redirects,
            verify_tls: false,
        }
    }

    #[test]
    fn test_validate_probe_settings() {
        assert!(validate_probe_settings(&settings(1, 0.5, 1)).is_ok());
        assert!(validate_probe_settings(&settings(200, 30.0, 50)).is_ok());

        assert!(validate_probe_settings(&settings(0, 30.0, 10)).is_err());
        assert!(validate_probe_settings(&settings(10, 0.0, 10)).is_err());
        assert!(validate_probe_settings(&settings(10, -1.0, 10)).is_err());
        assert!(validate_probe_settings(&settings(10, f64::NAN, 10)).is_err());
        assert!(validate_probe_settings(&settings(10, f64::INFINITY, 10)).is_err());
        assert!(validate_probe_settings(&settings(10, 30.0, 0)).is_err());
        assert!(validate_probe_settings(&settings(10, 30.0, 51)).is_err());
    }

    #[test]
    fn test_settings_upper_bounds() {
        let max = Semaphore::MAX_PERMITS;
        assert!(validate_probe_settings(&settings(max, 30.0, 10)).is_ok());
        assert!(validate_probe_settings(&settings(max + 1, 30.0, 10)).is_err());
        assert!(validate_probe_settings(&settings(usize::MAX, 30.0, 10)).is_err());

        assert!(validate_probe_settings(&settings(10, 1e9, 10)).is_ok());
        assert!(validate_probe_settings(&settings(10, 1e20, 10)).is_err());
        assert!(validate_probe_settings(&settings(10, f64::MAX, 10)).is_err());
    }

    #[test]
    fn test_validate_user_agent() {
        assert!(validate_header_value("Mozilla/5.0 (X11; Linux x86_64)").is_ok());

        assert!(validate_header_value("").is_err());
        assert!(validate_header_value("   ").is_err());
        assert!(validate_header_value("bad\nagent").is_err());
    }

    #[test]
    fn test_validate_user_agent_pool_entries() {
        let config = UserAgentConfig {
            value: None,
            pool: vec!["AgentA/1.0".to_string(), "".to_string()],
        };
        assert!(validate_user_agent_config(&config).is_err());
    }

    #[test]
    fn test_validate_output_config() {
        let mut config = OutputConfig::default();
        assert!(validate_output_config(&config).is_ok());

        config.max_display = 0;
        assert!(validate_output_config(&config).is_err());

        config.max_display = 5;
        config.json_path = Some(" ".to_string());
        assert!(validate_output_config(&config).is_err());
    }
}
