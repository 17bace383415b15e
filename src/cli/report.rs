//! Report formatting and printing.
//!
//! One line per file with its outcome, followed by a summary. Separate from
//! the migration logic so vuemigrate stays usable as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::run::RunOutput;
use crate::migrator::{BatchReport, FileStatus};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(output: &RunOutput, verbose: bool) {
    if output.json {
        match serde_json::to_string_pretty(&output.report) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Error: failed to serialize report: {}", err),
        }
        return;
    }
    print_to(&output.report, verbose, &mut io::stdout().lock());
}

/// Print the human report to a custom writer. Useful for testing.
pub fn print_to<W: Write>(report: &BatchReport, verbose: bool, writer: &mut W) {
    for file in &report.reports {
        match file.status {
            FileStatus::Migrated => {
                if verbose {
                    let _ = writeln!(
                        writer,
                        "{} {}",
                        SUCCESS_MARK.green(),
                        file.path.display()
                    );
                }
            }
            FileStatus::Skipped => {
                let _ = writeln!(
                    writer,
                    "{} {} {}",
                    "-".dimmed(),
                    file.path.display(),
                    "(skipped)".dimmed()
                );
            }
            FileStatus::Failed => {
                let _ = writeln!(
                    writer,
                    "{} {}: {}",
                    FAILURE_MARK.red(),
                    file.path.display(),
                    file.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    print_summary(report, writer);
}

fn print_summary<W: Write>(report: &BatchReport, writer: &mut W) {
    let migrated = report.count(FileStatus::Migrated);
    let failed = report.count(FileStatus::Failed);
    let skipped = report.count(FileStatus::Skipped);

    if failed > 0 {
        let mut parts = format!(
            "{} of {} {} failed",
            failed,
            report.reports.len(),
            if report.reports.len() == 1 {
                "file"
            } else {
                "files"
            }
        );
        if skipped > 0 {
            parts.push_str(&format!(", {} skipped", skipped));
        }
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), parts.red());
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Migrated {} {}",
                migrated,
                if migrated == 1 { "file" } else { "files" }
            )
            .green()
        );
    }
}
