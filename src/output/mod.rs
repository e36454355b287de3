//! Output formatting module.
//!
//! Renders results as a table, reports live progress, and saves results as
//! CSV or JSON.

mod csv_format;
mod json_format;
mod progress;
mod table;

pub use csv_format::{write_csv, write_csv_to, ABSENT_FIELD, CSV_HEADER};
pub use json_format::write_json;
pub use progress::{found_line, LogObserver, ProgressObserver};
pub use table::{render_table, row_cells, COLUMNS};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::scanner::ScanReport;
use console::style;
use std::fmt::Display;
use std::path::Path;

/// Placeholder shown for absent fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display a value, or `N/A` when it is absent.
pub fn display_or_na<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}

/// Print the results table for a finished scan.
pub fn print_results(report: &ScanReport) {
    let table = render_table(&report.results, report.protocol);
    let mut lines = table.lines();

    if let Some(title) = lines.next() {
        println!();
        println!("{}", style(title).cyan().bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

/// Save a report to `path` in the requested format.
pub fn save_report(report: &ScanReport, format: OutputFormat, path: &Path) -> CliResult<()> {
    match format {
        OutputFormat::Csv => write_csv(path, &report.results)?,
        OutputFormat::Json => write_json(path, report)?,
    }
    Ok(())
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &str, protocol: &str, hosts: usize, threads: usize) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("hostscan").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Protocol: {}", style("•").dim(), style(protocol).yellow());
    println!("{} Target: {}", style("•").dim(), style(target).white().bold());
    println!(
        "{} Scanning {} hosts with {} threads...",
        style("•").dim(),
        style(hosts).white().bold(),
        threads
    );
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
