//! Console output for batch summaries and configuration problems

use colored::Colorize;
use crew_application::BatchSummary;
use std::fmt::Display;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the outcome of a batch run
    pub fn format_batch(summary: &BatchSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Review Summary"));
        output.push('\n');

        output.push_str(&format!(
            "{} {} changed, {} reviewed, {} skipped, {} failed\n",
            "Files:".cyan().bold(),
            summary.considered,
            summary.written.len(),
            summary.skipped.len(),
            summary.failed.len()
        ));

        if !summary.written.is_empty() {
            output.push_str(&Self::section_header("Reports"));
            for report in &summary.written {
                let note = if report.collided {
                    " (renamed, base name taken)".yellow().to_string()
                } else {
                    String::new()
                };
                output.push_str(&format!(
                    "  {} {} -> {}{}\n",
                    "v".green(),
                    report.path,
                    report.location,
                    note
                ));
            }
        }

        if !summary.failed.is_empty() {
            output.push_str(&Self::section_header("Failed"));
            for failure in &summary.failed {
                output.push_str(&format!(
                    "  {} {}\n    {}\n",
                    "x".red(),
                    failure.path,
                    failure.error.dimmed()
                ));
            }
        }

        if !summary.skipped.is_empty() {
            output.push_str(&Self::section_header("Skipped"));
            for path in &summary.skipped {
                output.push_str(&format!("  {} {}\n", "-".dimmed(), path.dimmed()));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format configuration issues, one per line
    pub fn format_issues<T: Display>(issues: &[T]) -> String {
        issues
            .iter()
            .map(|issue| format!("{} {}\n", "config".yellow().bold(), issue))
            .collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
