//! CSV output formatting.
//!
//! One line per result under a fixed header. Fields are never quoted, so a
//! value containing a comma will shift the columns of its row.

use crate::types::ProbeResult;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io;
use std::path::Path;

/// Header row written before any result.
pub const CSV_HEADER: [&str; 5] = ["Host", "IP", "Server", "Port", "Status Code"];

/// Literal written in place of an absent field.
pub const ABSENT_FIELD: &str = "None";

fn field<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| ABSENT_FIELD.to_string(), ToString::to_string)
}

/// Write results as CSV to any writer. Absent values are written as `None`.
pub fn write_csv_to<W: io::Write>(writer: W, results: &[ProbeResult]) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    // Write header
    wtr.write_record(CSV_HEADER)?;

    // Write results
    for result in results {
        wtr.write_record([
            result.host.clone(),
            field(result.ip.as_ref()),
            field(result.server.as_ref()),
            field(result.port.as_ref()),
            field(result.status.as_ref()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write results as CSV to a file, replacing it if it exists.
pub fn write_csv(path: &Path, results: &[ProbeResult]) -> csv::Result<()> {
    let file = File::create(path)?;
    write_csv_to(file, results)
}
