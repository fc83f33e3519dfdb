//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use dirsync_engine::SyncReport;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "📂", message.bold());
}

/// Print what is about to be synced.
pub fn print_plan(source: &Path, target: &Path, workers: Option<usize>) {
    println!("Source: {}", source.display().to_string().cyan());
    println!("Target: {}", target.display().to_string().cyan());
    match workers {
        Some(n) => println!("Workers: {n}"),
        None => println!("Workers: {}", "inline".dimmed()),
    }
    println!();
}

/// Print the final counts of a run.
pub fn print_summary(report: &SyncReport, elapsed: Duration) {
    println!();
    println!(
        "{} {} file{} copied in {:.2}s",
        "✓".green(),
        report.copied,
        if report.copied == 1 { "" } else { "s" },
        elapsed.as_secs_f64()
    );
    println!(
        "  {} {} directories created, {} ignored, {} skipped",
        "•".dimmed(),
        report.dirs_created,
        report.ignored,
        report.skipped
    );
    if report.failed > 0 {
        print_warning(&format!(
            "{} of {} copy tasks failed",
            report.failed, report.tasks
        ));
    }
    if report.walk_errors > 0 {
        print_warning(&format!(
            "{} directories could not be synced",
            report.walk_errors
        ));
    }
}

/// Print cancellation notice.
pub fn print_cancelled() {
    println!("{}", "Cancelled, nothing copied.".dimmed());
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
