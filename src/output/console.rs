//! Plain-text terminal report

use crate::checker::{AuditReport, ProbeResult};
use crate::output::categories::Category;
use crate::output::stats::Statistics;
use reqwest::StatusCode;

const RULE_WIDTH: usize = 80;
const URL_WIDTH: usize = 50;
const ERROR_WIDTH: usize = 30;
const ANCHOR_WIDTH: usize = 25;

/// Categories shown as problem tables, in display order
const PROBLEM_CATEGORIES: [Category; 6] = [
    Category::BrokenLinks,
    Category::ClientErrors,
    Category::ServerErrors,
    Category::NetworkErrors,
    Category::Timeouts,
    Category::Redirects,
];

/// Shortens text to `width` characters, ending in `...` when cut
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Describes a status code with its canonical reason phrase
pub fn status_description(code: u16) -> &'static str {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown")
}

/// Renders the statistics table
pub fn render_statistics(stats: &Statistics) -> String {
    let rows = [
        ("Total Links", stats.total_links.to_string()),
        ("Working Links", stats.working_links.to_string()),
        ("Broken Links", stats.broken_links.to_string()),
        ("Internal Links", stats.internal_links.to_string()),
        ("External Links", stats.external_links.to_string()),
        ("Success Rate", format!("{:.1}%", stats.success_rate)),
        ("Average Response Time", format!("{:.2}s", stats.avg_response_time)),
        ("Redirects Found", stats.redirects.to_string()),
        ("Timeouts", stats.timeouts.to_string()),
        ("Network Errors", stats.network_errors.to_string()),
    ];

    let mut out = format!("\n{}\nLINK STATISTICS\n\n", rule());
    out.push_str(&format!("  {:<24} {}\n", "Metric", "Value"));
    for (metric, value) in rows {
        out.push_str(&format!("  {:<24} {}\n", metric, value));
    }
    out
}

/// Renders the status code distribution; empty when no status was observed
pub fn render_status_distribution(stats: &Statistics) -> String {
    if stats.status_code_distribution.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nStatus Code Distribution:\n");
    out.push_str(&format!("  {:<12} {:<8} {}\n", "Status Code", "Count", "Description"));
    for (code, count) in &stats.status_code_distribution {
        out.push_str(&format!(
            "  {:<12} {:<8} {}\n",
            code,
            count,
            status_description(*code)
        ));
    }
    out
}

/// Renders one problem category as a table of at most `max_display` rows
///
/// Returns an empty string for an empty category.
pub fn render_category(category: Category, results: &[ProbeResult], max_display: usize) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = format!("\n{} ({} items)\n", category.title(), results.len());
    out.push_str(&format!(
        "  {:<50} {:<6} {:<30} {:<25} {:<8} {}\n",
        "URL", "Status", "Error", "Anchor Text", "Type", "Method"
    ));

    for result in results.iter().take(max_display) {
        let status = result
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!(
            "  {:<50} {:<6} {:<30} {:<25} {:<8} {}\n",
            clip(&result.url, URL_WIDTH),
            status,
            clip(&result.error_message, ERROR_WIDTH),
            clip(&result.anchor_text, ANCHOR_WIDTH),
            result.link_type.as_str(),
            result.method_used
        ));
    }

    if results.len() > max_display {
        out.push_str(&format!("  ... and {} more items\n", results.len() - max_display));
    }
    out
}

/// Renders the working links table; empty when there are none
pub fn render_working_links(results: &[ProbeResult], max_display: usize) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = format!("\nWORKING LINKS ({} items)\n", results.len());
    out.push_str(&format!(
        "  {:<50} {:<6} {:<13} {:<25} {:<8} {}\n",
        "URL", "Status", "Response Time", "Anchor Text", "Type", "Method"
    ));

    for result in results.iter().take(max_display) {
        let status = result
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<50} {:<6} {:<13} {:<25} {:<8} {}\n",
            clip(&result.url, URL_WIDTH),
            status,
            format!("{:.2}s", result.response_time_secs),
            clip(&result.anchor_text, ANCHOR_WIDTH),
            result.link_type.as_str(),
            result.method_used
        ));
    }

    if results.len() > max_display {
        out.push_str(&format!(
            "  ... and {} more working links\n",
            results.len() - max_display
        ));
    }
    out
}

/// Renders the closing summary block
pub fn render_summary(stats: &Statistics) -> String {
    format!(
        "\n{}\nAUDIT COMPLETE\nTotal Links: {}\nWorking: {} ({:.1}%)\nBroken: {}\nAverage Response Time: {:.2}s\n",
        rule(),
        stats.total_links,
        stats.working_links,
        stats.success_rate,
        stats.broken_links,
        stats.avg_response_time
    )
}

/// Prints the full report to stdout, except the closing summary
///
/// # Arguments
///
/// * `report` - The completed audit
/// * `show_working` - Whether to list working links
/// * `max_display` - Row limit per table
pub fn print_report(report: &AuditReport, show_working: bool, max_display: usize) {
    print!("{}", render_statistics(&report.statistics));
    print!("{}", render_status_distribution(&report.statistics));

    for category in PROBLEM_CATEGORIES {
        print!(
            "{}",
            render_category(category, report.categorized.get(category), max_display)
        );
    }

    if show_working {
        print!(
            "{}",
            render_working_links(&report.categorized.working_links, max_display)
        );
    }
}

/// Prints the closing summary to stdout
pub fn print_summary(stats: &Statistics) {
    print!("{}", render_summary(stats));
}
