//! Live scan progress for the terminal.

use super::display_or_na;
use crate::probe::Protocol;
use crate::scanner::ScanObserver;
use crate::types::ProbeResult;
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// One-line description of a found host.
pub fn found_line(result: &ProbeResult) -> String {
    format!(
        "Found: {} ({}) | Port: {} | Status: {}",
        result.host,
        display_or_na(result.ip.as_ref()),
        display_or_na(result.port.as_ref()),
        display_or_na(result.status.as_ref()),
    )
}

/// Progress bar that prints every found host above itself.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    /// Draw to stderr.
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Draw to the given target.
    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            bar: ProgressBar::with_draw_target(Some(0), target),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanObserver for ProgressObserver {
    fn on_start(&mut self, total: usize, protocol: Protocol) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        self.bar.set_message(format!("Scanning hosts ({})...", protocol));
    }

    fn on_progress(&mut self, completed: usize, _total: usize) {
        self.bar.set_position(completed as u64);
    }

    fn on_found(&mut self, result: &ProbeResult) {
        self.bar
            .println(style(found_line(result)).green().bold().to_string());
    }

    fn on_finish(&mut self, found: usize, _completed: usize) {
        self.bar
            .finish_with_message(format!("Scan complete, {} found", found));
    }
}

/// Reports found hosts through `tracing` instead of drawing a bar.
#[derive(Debug, Default)]
pub struct LogObserver;

impl ScanObserver for LogObserver {
    fn on_start(&mut self, total: usize, protocol: Protocol) {
        info!(total, %protocol, "scanning hosts");
    }

    fn on_found(&mut self, result: &ProbeResult) {
        info!("{}", found_line(result));
    }
}
