//! Link-Audit main entry point
//!
//! This is the command-line interface for auditing the outbound links of a
//! single web page.

use anyhow::{Context, Result};
use clap::Parser;
use link_audit::checker::{build_http_client, fetch_page, Auditor};
use link_audit::config::{read_config, validate, Config};
use link_audit::output::{console, write_json_report};
use link_audit::url::parse_page_url;
use reqwest::redirect::Policy;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Link-Audit: concurrent link validation for a web page
///
/// Link-Audit fetches a page, extracts every hyperlink on it, and checks each
/// link for reachability (HEAD first, falling back to GET). Results are
/// summarized on the terminal and optionally written as JSON.
#[derive(Parser, Debug)]
#[command(name = "link-audit")]
#[command(version)]
#[command(about = "Audit the outbound links of a web page", long_about = None)]
struct Cli {
    /// The page URL to audit
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum concurrent requests
    #[arg(short = 'c', long)]
    max_concurrent: Option<usize>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<f64>,

    /// Output file for JSON results
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show working links
    #[arg(short = 'w', long)]
    show_working: bool,

    /// Maximum items to display per category
    #[arg(short, long)]
    max_display: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_concurrent) = self.max_concurrent {
            config.probe.max_concurrent = max_concurrent;
        }
        if let Some(timeout) = self.timeout {
            config.probe.timeout_secs = timeout;
        }
        if let Some(output) = &self.output {
            config.output.json_path = Some(output.display().to_string());
        }
        if self.show_working {
            config.output.show_working = true;
        }
        if let Some(max_display) = self.max_display {
            config.output.max_display = max_display;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            read_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    // Flags are layered on first so a file value they replace is never checked
    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid settings")?;

    let page_url =
        parse_page_url(&cli.url).with_context(|| format!("Invalid URL '{}'", cli.url))?;

    let user_agent = config.user_agent.resolve();
    tracing::debug!("Using User-Agent: {}", user_agent);

    let page_client = build_http_client(
        &config.probe,
        &user_agent,
        Policy::limited(config.probe.max_redirects),
    )
    .context("Failed to build HTTP client")?;
    let page = fetch_page(&page_client, &page_url)
        .await
        .with_context(|| format!("Failed to fetch {}", page_url))?;

    let auditor = Auditor::with_http(config.probe.clone(), &user_agent)?;
    let report = auditor.audit(&page.body, page_url.as_str()).await?;

    console::print_report(
        &report,
        config.output.show_working,
        config.output.max_display,
    );

    if let Some(path) = &config.output.json_path {
        write_json_report(&report, Path::new(path))
            .with_context(|| format!("Failed to save results to {}", path))?;
        println!("\nResults saved to {}", path);
    }

    console::print_summary(&report.statistics);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_audit=info,warn"),
            1 => EnvFilter::new("link_audit=debug,info"),
            2 => EnvFilter::new("link_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_repair_invalid_file_settings() {
        let mut config = Config::default();
        config.probe.max_concurrent = 0;
        assert!(validate(&config).is_err());

        let cli = Cli::parse_from(["link-audit", "https://site.test/", "-c", "5", "-t", "2.5"]);
        cli.apply_overrides(&mut config);

        assert_eq!(config.probe.max_concurrent, 5);
        assert_eq!(config.probe.timeout_secs, 2.5);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_overrides_leave_unset_fields_alone() {
        let mut config = Config::default();
        config.output.max_display = 7;

        let cli = Cli::parse_from(["link-audit", "https://site.test/", "-w"]);
        cli.apply_overrides(&mut config);

        assert!(config.output.show_working);
        assert_eq!(config.output.max_display, 7);
        assert_eq!(config.probe.max_concurrent, Config::default().probe.max_concurrent);
    }
}
