//! JSON report file output

use crate::checker::AuditReport;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes an audit report as pretty-printed JSON
pub fn report_to_json(report: &AuditReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes an audit report to a JSON file, replacing any existing file
///
/// # Arguments
///
/// * `report` - The completed audit
/// * `path` - Destination file
pub fn write_json_report(report: &AuditReport, path: &Path) -> OutputResult<()> {
    let json = report_to_json(report)?;

    fs::write(path, json).map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Wrote JSON report to {}", path.display());
    Ok(())
}
