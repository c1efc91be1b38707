//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Run
//!
//! ```text
//! Transcoding 2 images
//! 001 a.jpg (1600x900)
//!     full jpg: 1600x900
//!     full webp: 1600x900
//!     480w jpg: 480x270
//!     ...
//! 002 b.png (300x200)
//!     ...
//!
//! Unused source images (1)
//!     c.jpeg
//! Pruned 1 unused source image
//!
//! Generated 16 variants for 2 images
//! ```
//!
//! ## Audit
//!
//! ```text
//! Selected 2 images
//! Unused source images (1)
//!     c.jpeg
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::pipeline::{AuditReport, RunReport};
use crate::process::ProcessEvent;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

// ============================================================================
// Run output
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { count } => {
            vec![format!("Transcoding {}", plural(*count, "image"))]
        }
        ProcessEvent::ImageProcessed {
            index,
            file_name,
            dimensions: (width, height),
            variants,
        } => {
            let mut lines = vec![format!(
                "{} {} ({}x{})",
                format_index(*index),
                file_name,
                width,
                height
            )];
            for variant in variants {
                lines.push(format!(
                    "{}{}: {}x{}",
                    indent(1),
                    variant.label,
                    variant.width,
                    variant.height
                ));
            }
            lines
        }
    }
}

/// Format the unused-source listing.
pub fn format_unused(unused: &[String]) -> Vec<String> {
    if unused.is_empty() {
        return vec!["No unused source images".to_string()];
    }
    let mut lines = vec![format!("Unused source images ({})", unused.len())];
    lines.extend(unused.iter().map(|name| format!("{}{}", indent(1), name)));
    lines
}

/// Format the end-of-run summary: unused listing, prune result, totals.
pub fn format_run_summary(report: &RunReport) -> Vec<String> {
    let mut lines = vec![String::new()];
    lines.extend(format_unused(&report.unused));
    if report.pruned > 0 {
        lines.push(format!(
            "Pruned {}",
            plural(report.pruned, "unused source image")
        ));
    }

    let variant_count: usize = report.processed.iter().map(|p| p.variants.len()).sum();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} for {}",
        plural(variant_count, "variant"),
        plural(report.processed.len(), "image")
    ));
    lines
}

pub fn print_run_summary(report: &RunReport) {
    for line in format_run_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Audit output
// ============================================================================

pub fn format_audit(report: &AuditReport) -> Vec<String> {
    let mut lines = vec![format!("Selected {}", plural(report.selection.len(), "image"))];
    lines.extend(format_unused(&report.unused));
    lines
}

pub fn print_audit(report: &AuditReport) {
    for line in format_audit(report) {
        println!("{}", line);
    }
}
