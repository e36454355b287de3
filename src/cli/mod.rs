//! Command-line interface.
//!
//! Two front ends produce the same [`ScanRequest`]:
//! - `hostscan scan --cidr 10.0.0.0/24 -p http -t 100` - flags
//! - `hostscan` - interactive prompts on stdin
//!
//! A request is turned into a [`ScanJob`] and handed to the dispatcher, which
//! knows nothing about either front end.

mod prompt;
mod scan;

pub use prompt::Prompter;
pub use scan::ScanCommand;

use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output::{self, LogObserver, ProgressObserver};
use crate::probe::{HostResolver, Protocol};
use crate::scanner::{run_scan, Interrupt, ScanJob, ScanObserver, ScanReport, SilentObserver};
use crate::types::{TargetSpec, Targets};
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// hostscan - find which hosts answer over HTTP, UDP or TCP.
///
/// Run without a subcommand for the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "hostscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent host reachability scanner", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan targets without prompting
    #[command(alias = "s")]
    Scan(ScanCommand),
}

/// File format for saved results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated rows under a header
    #[default]
    Csv,
    /// Full scan report as JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A fully specified scan, with targets already expanded.
#[derive(Debug)]
pub struct ScanRequest {
    /// What the user asked to scan, for display.
    pub target: TargetSpec,
    pub targets: Targets,
    pub protocol: Protocol,
    pub threads: i64,
    pub timeout: Duration,
    pub batch_size: usize,
    /// Where to save results, if anywhere.
    pub output: Option<(PathBuf, OutputFormat)>,
}

impl ScanRequest {
    /// Expand `target` and fill in everything else from `settings`.
    pub fn new(
        target: TargetSpec,
        protocol: Protocol,
        threads: i64,
        settings: &AppSettings,
    ) -> CliResult<Self> {
        let targets = target.expand()?;
        debug!(%target, mode = %target.mode(), hosts = targets.len(), "expanded targets");

        Ok(Self {
            target,
            targets,
            protocol,
            threads,
            timeout: settings.timeout(),
            batch_size: settings.batch_size,
            output: None,
        })
    }

    /// Build the dispatcher job for this request.
    pub fn into_job(
        self,
        resolver: Arc<HostResolver>,
        cancel: Arc<AtomicBool>,
    ) -> CliResult<ScanJob> {
        let probe = self
            .protocol
            .strategy(resolver)
            .map_err(|e| CliError::InvalidSelection(e.to_string()))?;

        let job = ScanJob::new(self.targets, probe, self.threads, self.timeout)?
            .with_batch_size(self.batch_size)?
            .with_cancel_flag(cancel);
        Ok(job)
    }
}

/// How much to show while a scan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
}

/// Run a request end to end: header, scan, results table and optional save.
pub async fn execute(
    mut request: ScanRequest,
    verbosity: Verbosity,
    interrupt: &Interrupt,
) -> CliResult<ScanReport> {
    let target = request.target.to_string();
    let output_target = request.output.take();
    let protocol = request.protocol;

    let job = request.into_job(Arc::new(HostResolver::new()), interrupt.cancel_flag())?;

    let mut observer: Box<dyn ScanObserver> = match verbosity {
        Verbosity::Quiet => Box::new(SilentObserver),
        Verbosity::Normal if console::Term::stderr().is_term() => Box::new(ProgressObserver::new()),
        Verbosity::Normal => Box::new(LogObserver),
    };

    if verbosity == Verbosity::Normal {
        output::print_scan_header(&target, &protocol.to_string(), job.total(), job.pool_size());
    }

    interrupt.begin_scan();
    let report = run_scan(job, observer.as_mut()).await;
    interrupt.end_scan();

    if verbosity == Verbosity::Normal {
        output::print_results(&report);
        output::print_info(&report.summary());
    }
    if report.cancelled {
        output::print_warning(&format!(
            "scan interrupted after {} of {} hosts",
            report.completed, report.total
        ));
    }

    if let Some((path, format)) = output_target {
        output::save_report(&report, format, &path)?;
        if verbosity == Verbosity::Normal {
            output::print_success(&format!("Results saved to {}", path.display()));
        }
    }

    Ok(report)
}

/// Entry point for the binary.
pub async fn run(cli: Cli, interrupt: &Interrupt) -> CliResult<()> {
    let settings = AppSettings::resolve(cli.config.as_deref())?;
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };

    match cli.command {
        Some(Commands::Scan(command)) => command.execute(&settings, verbosity, interrupt).await,
        None => {
            let mut prompter = Prompter::stdio();
            let request = prompter.read_request(&settings)?;
            let report = execute(request, verbosity, interrupt).await?;

            if let Some(path) = prompter.ask_save(&report)? {
                output::save_report(&report, OutputFormat::Csv, &path)?;
                output::print_success(&format!("Results saved to {}", path.display()));
            }
            Ok(())
        }
    }
}
