use anyhow::{anyhow, Result};
use clap::Parser;
use hostscan::cli::{self, Cli};
use hostscan::output;
use hostscan::scanner::{Interrupt, InterruptAction};
use std::process::{self, ExitCode};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let interrupt = Arc::new(Interrupt::new());
    let handler = Arc::clone(&interrupt);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            match handler.interrupt() {
                InterruptAction::Drain => {
                    warn!("interrupt received, finishing current batch (press Ctrl-C again to quit)")
                }
                InterruptAction::Exit => process::exit(130),
            }
        }
    });

    match cli::run(cli, &interrupt).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            output::print_error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let default = if cli.verbose {
        "hostscan=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
