//! Configuration module for Link-Audit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an audit can also run from defaults plus
//! command-line overrides.
//!
//! # Example
//!
//! ```no_run
//! use link_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-audit.toml")).unwrap();
//! println!("Probe timeout: {}s", config.probe.timeout_secs);
//! ```

mod parser;
mod types;
mod user_agent;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ProbeSettings, UserAgentConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config, read_config};
pub use validation::{validate, validate_probe_settings};
