//! CLI output formatting.
//!
//! Pure `format_*` functions build the lines (testable, no I/O) and thin
//! `print_*` wrappers write them to stdout. The build prints one line per
//! output file (`Built:` or `Unchanged:`), inline warnings as they occur,
//! a missing-image summary, and a final changed-file count.

use crate::writer::WriteOutcome;

/// Format the per-file line for a change-aware write.
pub fn format_write(outcome: WriteOutcome, rel_path: &str) -> String {
    match outcome {
        WriteOutcome::Written => format!("  Built: {rel_path}"),
        WriteOutcome::Unchanged => format!("  Unchanged: {rel_path}"),
    }
}

pub fn print_write(outcome: WriteOutcome, rel_path: &str) {
    println!("{}", format_write(outcome, rel_path));
}

pub fn format_warning(message: &str) -> String {
    format!("  WARNING: {message}")
}

pub fn print_warning(message: &str) {
    println!("{}", format_warning(message));
}

/// Format the per-demo line for an asset-freshness date bump.
pub fn format_asset_bump(demo_path: &str) -> String {
    format!("  Asset changed: {demo_path}")
}

pub fn print_asset_bump(demo_path: &str) {
    println!("{}", format_asset_bump(demo_path));
}

/// Format the end-of-run summary of missing image files.
pub fn format_missing_images(missing: &[String]) -> Vec<String> {
    if missing.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("  WARNING: {} image(s) not found:", missing.len())];
    for entry in missing {
        lines.push(format!("    - {entry}"));
    }
    lines
}

pub fn print_missing_images(missing: &[String]) {
    for line in format_missing_images(missing) {
        println!("{line}");
    }
}

/// Format the final build summary line.
pub fn format_summary(changed: usize) -> String {
    if changed > 0 {
        format!("  {changed} file(s) updated.")
    } else {
        "  All files up to date - nothing written.".to_string()
    }
}

pub fn print_summary(changed: usize) {
    println!();
    println!("{}", format_summary(changed));
}
