//! # hostscan - A Concurrent Host Reachability Scanner
//!
//! hostscan expands a list of targets and probes each one over a chosen
//! protocol, reporting the hosts that answered.
//!
//! ## Features
//!
//! - **Flexible Targeting**: host files, IPv4 CIDR ranges and single domains
//! - **Several Probes**: HTTP, SSL, WebSocket, UDP and TCP connect
//! - **Bounded Concurrency**: a fixed worker pool fed in batches
//! - **Output**: a results table, CSV and JSON files
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use hostscan::probe::{HostResolver, Protocol};
//! use hostscan::scanner::{run_scan, ScanJob, SilentObserver};
//! use hostscan::types::TargetSpec;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let targets = TargetSpec::Cidr("192.168.1.0/24".into()).expand()?;
//!     let probe = Protocol::Http.strategy(Arc::new(HostResolver::new()))?;
//!     let job = ScanJob::new(targets, probe, 100, Duration::from_secs(3))?;
//!
//!     let report = run_scan(job, &mut SilentObserver).await;
//!     for result in &report.results {
//!         println!("{} answered", result.host);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - targets, expansion and probe results
//! - [`probe`] - the probe strategies and hostname resolution
//! - [`scanner`] - the bounded-concurrency dispatcher and its observer hooks
//! - [`output`] - table, CSV, JSON and progress rendering
//! - [`cli`] - flag and interactive front ends
//! - [`config`] - settings file defaults
//! - [`error`] - error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod probe;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError, TargetError};
pub use probe::{Probe, Protocol};
pub use scanner::{run_scan, ScanJob, ScanObserver, ScanReport};
pub use types::{ProbeResult, ProbeStatus, TargetSpec, Targets};
