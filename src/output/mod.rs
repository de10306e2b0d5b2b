//! Output module for audit results
//!
//! This module handles:
//! - Computing summary statistics over probe results
//! - Partitioning results into report categories
//! - Rendering the terminal report
//! - Writing the JSON report file

mod categories;
pub mod console;
mod json;
mod stats;

pub use categories::{categorize, CategorizedResults, Category};
pub use json::{report_to_json, write_json_report, OutputError, OutputResult};
pub use stats::{compute_statistics, Statistics};
