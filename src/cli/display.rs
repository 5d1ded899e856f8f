//! Human-readable CLI display
//!
//! Renders resolution and sweep results for the terminal. All decorated
//! output goes to stderr so stdout carries only paths or JSON.

use std::path::Path;

use colored::Colorize;

use crate::workspace::{DirectorySource, PruneReport, ResolvedWorkingDirectory};

/// Render a one-line summary of a resolved working directory
#[must_use]
pub fn render_resolved(resolved: &ResolvedWorkingDirectory) -> String {
    let label = match resolved.source {
        DirectorySource::Explicit => "explicit".green(),
        DirectorySource::Environment => "CLAUDE_CWD".cyan(),
        DirectorySource::Temporary => "temporary".yellow(),
    };
    format!(
        "{} {} {}",
        "Workspace:".bold(),
        resolved.path.display(),
        format!("({label})").dimmed()
    )
}

/// Print the resolved working directory summary to stderr
pub fn print_resolved(resolved: &ResolvedWorkingDirectory) {
    eprintln!("{}", render_resolved(resolved));
}

/// Print a note that a temporary workspace was removed
pub fn print_cleaned(path: &Path) {
    eprintln!("  {} Removed {}", "✓".green().bold(), path.display());
}

/// Print a note that a temporary workspace is left for the caller to remove
pub fn print_kept(path: &Path) {
    eprintln!(
        "  {} Kept {} (remove it yourself or run `claude-workspace prune`)",
        "!".yellow().bold(),
        path.display()
    );
}

/// Render a prune report as multi-line text
#[must_use]
pub fn render_prune_report(report: &PruneReport) -> String {
    let verb = if report.dry_run { "Would remove" } else { "Removed" };
    let mut lines =
        Vec::with_capacity(report.removed.len() + report.failed.len() + report.skipped.len() + 1);

    for path in &report.removed {
        lines.push(format!("  {} {verb} {}", "✓".green(), path.display()));
    }
    for failure in &report.failed {
        lines.push(format!(
            "  {} {}: {}",
            "✗".red().bold(),
            failure.path.display(),
            failure.error.red()
        ));
    }
    for path in &report.skipped {
        lines.push(format!("  {} Skipped {} (recently used)", "-".dimmed(), path.display()));
    }

    let summary = if report.removed.is_empty() && report.failed.is_empty() {
        if report.skipped.is_empty() {
            "No leftover workspaces found".dimmed().to_string()
        } else {
            format!(
                "No idle workspaces found, {} recently used one(s) skipped",
                report.skipped.len()
            )
        }
    } else {
        format!(
            "{} {} workspace(s), {} failure(s), {} skipped",
            verb.bold(),
            report.removed.len(),
            report.failed.len(),
            report.skipped.len()
        )
    };
    lines.push(summary);
    lines.join("\n")
}
