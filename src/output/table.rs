//! Tabular rendering of scan results.

use super::display_or_na;
use crate::probe::Protocol;
use crate::types::ProbeResult;
use std::fmt::Write;

/// Column headings, in display order.
pub const COLUMNS: [&str; 5] = ["Host", "IP", "Server", "Port", "Status Code"];

/// The five display cells of one result, with `N/A` for absent fields.
pub fn row_cells(result: &ProbeResult) -> [String; 5] {
    [
        result.host.clone(),
        display_or_na(result.ip.as_ref()),
        display_or_na(result.server.as_ref()),
        display_or_na(result.port.as_ref()),
        display_or_na(result.status.as_ref()),
    ]
}

/// Render results as a plain-text table titled with the protocol.
pub fn render_table(results: &[ProbeResult], protocol: Protocol) -> String {
    let rows: Vec<[String; 5]> = results.iter().map(row_cells).collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    let rule = "─".repeat(rule_len);

    let mut out = String::new();
    let _ = writeln!(out, "Working Hosts ({})", protocol);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", format_row(&COLUMNS.map(String::from), &widths));
    let _ = writeln!(out, "{}", rule);

    if rows.is_empty() {
        let _ = writeln!(out, "No hosts responded.");
    }
    for row in &rows {
        let _ = writeln!(out, "{}", format_row(row, &widths));
    }
    let _ = writeln!(out, "{}", rule);

    out
}

fn format_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" │ ")
        .trim_end()
        .to_string()
}
