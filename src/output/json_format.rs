//! JSON output formatting.

use crate::scanner::ScanReport;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write the full scan report as pretty-printed JSON.
pub fn write_json(path: &Path, report: &ScanReport) -> io::Result<()> {
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, report)?;
    writeln!(file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Protocol;
    use crate::types::ProbeResult;
    use chrono::Utc;

    #[test]
    fn test_report_round_trips_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = ScanReport {
            protocol: Protocol::Ws,
            started_at: Utc::now(),
            duration_ms: 42,
            total: 2,
            completed: 2,
            cancelled: false,
            results: vec![ProbeResult::new("a.example").with_port(80).with_status(101)],
        };

        write_json(&path, &report).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["protocol"], "ws");
        assert_eq!(value["total"], 2);
        assert_eq!(value["results"][0]["host"], "a.example");
        assert_eq!(value["results"][0]["status"], 101);
        assert!(value["results"][0]["ip"].is_null());
    }
}
