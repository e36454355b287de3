//! Error types for hostscan.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-target probe
//! failures live in [`crate::probe::ProbeError`] and never reach this level.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while expanding a target specification.
#[derive(Error, Debug)]
pub enum TargetError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid CIDR range: {0}")]
    InvalidRange(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the scan dispatcher before any work starts.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

/// Errors related to configuration management.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read config file {}: {reason}", path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),
}

/// User-facing errors surfaced by the command-line layer.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for target expansion.
pub type TargetResult<T> = Result<T, TargetError>;

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
