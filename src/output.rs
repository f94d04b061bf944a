//! CLI output formatting for sync and check runs.
//!
//! Output is information-first: each document leads with its positional
//! index and resolved title, with the source path as an indented context
//! line. Warnings and the license outcome get their own sections.
//!
//! ```text
//! Documents
//!     001 Introduction
//!         Source: index.md
//!     002 Getting Started
//!         Source: getting-started.md
//!
//! License
//!     matches parent site, not copied
//!
//! Warnings
//!     file not found, skipping: gone.md
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::manifest::{ORDER_FILE, Resolution};
use crate::sync::{LicenseOutcome, SyncReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Append a `Warnings` section when there is anything to warn about.
fn push_warnings(lines: &mut Vec<String>, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Warnings".to_string());
    for warning in warnings {
        lines.push(format!("    {warning}"));
    }
}

/// Format the report of a completed sync run.
pub fn format_sync_output(report: &SyncReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Documents".to_string());
    for (i, doc) in report.processed.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), doc.title));
        lines.push(format!("        Source: {}", doc.rel_path));
    }

    let license_line = match report.license {
        LicenseOutcome::Absent => None,
        LicenseOutcome::MatchesParent => Some("matches parent site, not copied"),
        LicenseOutcome::Copied => Some("differs from parent site, copied"),
        LicenseOutcome::CopiedWithoutBaseline => Some("no parent site LICENSE found, copied"),
    };
    if let Some(line) = license_line {
        lines.push(String::new());
        lines.push("License".to_string());
        lines.push(format!("    {line}"));
    }

    push_warnings(&mut lines, &report.warnings);
    lines
}

/// Print sync output to stdout.
pub fn print_sync_output(report: &SyncReport) {
    for line in format_sync_output(report) {
        println!("{line}");
    }
}

/// Format the report of a check run: where the ordering came from and what
/// a sync would process.
pub fn format_check_output(resolution: &Resolution) -> Vec<String> {
    let mut lines = Vec::new();

    if resolution.ordered {
        lines.push(format!(
            "Order: {ORDER_FILE} ({} documents)",
            resolution.entries.len()
        ));
    } else {
        lines.push("Order: filesystem discovery".to_string());
    }

    lines.push("Documents".to_string());
    for (i, entry) in resolution.entries.iter().enumerate() {
        let title = match &entry.title {
            Some(title) => format!(" ({title})"),
            None => String::new(),
        };
        lines.push(format!(
            "    {} {}{title}",
            format_index(i + 1),
            entry.rel_path
        ));
    }

    push_warnings(&mut lines, &resolution.warnings);
    lines
}

/// Print check output to stdout.
pub fn print_check_output(resolution: &Resolution) {
    for line in format_check_output(resolution) {
        println!("{line}");
    }
}
