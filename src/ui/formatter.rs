//! Pure formatting functions for UI output.
//!
//! Functions here only build strings or print them; nothing reads input.

use std::path::Path;

use console::style;

use crate::notice::SkipNotice;
use crate::substitution::UpdateReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a skip notice as a warning on stderr.
pub fn display_notice(notice: &SkipNotice) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), notice);
}

/// Display the version transition about to be applied.
pub fn display_version_change(current: &str, new: &str) {
    println!("\n{}", style("Version Change:").bold());
    println!("  From: {}", style(current).red());
    println!("  To:   {}", style(new).green());
}

/// Builds the per-file summary lines of an update pass.
///
/// Paths are shown relative to `root` where possible.
pub fn format_changed_files(report: &UpdateReport, root: &Path) -> Vec<String> {
    let verb = if report.dry_run {
        "Would update"
    } else {
        "Updated"
    };
    report
        .rules
        .iter()
        .flat_map(|rule| {
            rule.changed.iter().map(move |path| {
                let shown = path.strip_prefix(root).unwrap_or(path);
                format!("{} {} ({})", verb, shown.display(), rule.rule)
            })
        })
        .collect()
}

/// Display the outcome of an update pass.
///
/// Warnings are shown for notices that deserve attention; pattern-absent
/// skips are expected and only appear in debug logs.
pub fn display_report(report: &UpdateReport, root: &Path) {
    for rule in &report.rules {
        for notice in &rule.notices {
            if notice.is_warning() {
                display_notice(notice);
            } else {
                tracing::debug!("{}", notice);
            }
        }
    }

    if report.changed_files().is_empty() {
        display_status("No files needed changes");
        return;
    }
    for line in &format_changed_files(report, root) {
        display_success(line);
    }
}
