//! Scan subcommand implementation.
//!
//! Handles `hostscan scan` for scripted, non-interactive runs.

use super::{execute, OutputFormat, ScanRequest, Verbosity};
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::probe::Protocol;
use crate::scanner::Interrupt;
use crate::types::TargetSpec;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Scan targets for responding hosts.
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["file", "cidr", "domain"])))]
pub struct ScanCommand {
    /// File with one hostname per line
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// IPv4 CIDR range (e.g. 192.168.1.0/24)
    #[arg(long)]
    pub cidr: Option<String>,

    /// A single hostname or address
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Protocol to probe with
    #[arg(short, long, value_enum)]
    pub protocol: Option<Protocol>,

    /// Maximum number of concurrent probes
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Per-probe timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Targets submitted per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Save results to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format for the saved file
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
}

impl ScanCommand {
    /// The target specification selected by the flags.
    pub fn target_spec(&self) -> CliResult<TargetSpec> {
        if let Some(path) = &self.file {
            Ok(TargetSpec::File(path.clone()))
        } else if let Some(cidr) = &self.cidr {
            Ok(TargetSpec::Cidr(cidr.clone()))
        } else if let Some(domain) = &self.domain {
            if domain.trim().is_empty() {
                return Err(CliError::InvalidSelection("domain must not be empty".into()));
            }
            Ok(TargetSpec::Single(domain.clone()))
        } else {
            Err(CliError::InvalidSelection(
                "one of --file, --cidr or --domain is required".into(),
            ))
        }
    }

    /// Build the request, falling back to `settings` for anything not given.
    pub fn to_request(&self, settings: &AppSettings) -> CliResult<ScanRequest> {
        let protocol = self.protocol.unwrap_or(settings.default_protocol);
        let threads = self.threads.unwrap_or(settings.default_threads);

        let mut request = ScanRequest::new(self.target_spec()?, protocol, threads, settings)?;

        if let Some(ms) = self.timeout {
            request.timeout = Duration::from_millis(ms);
        }
        if let Some(batch_size) = self.batch_size {
            request.batch_size = batch_size;
        }
        request.output = self.output.clone().map(|path| (path, self.format));

        Ok(request)
    }

    /// Execute the scan command.
    pub async fn execute(
        &self,
        settings: &AppSettings,
        verbosity: Verbosity,
        interrupt: &Interrupt,
    ) -> CliResult<()> {
        let request = self.to_request(settings)?;
        execute(request, verbosity, interrupt).await?;
        Ok(())
    }
}
