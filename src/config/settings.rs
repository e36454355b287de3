//! Application settings and paths.
//!
//! Settings live in an XDG-compliant location and only supply defaults;
//! anything given on the command line wins.

use crate::error::{ConfigError, ConfigResult};
use crate::probe::Protocol;
use crate::scanner::DEFAULT_BATCH_SIZE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/hostscan)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform configuration directory.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "hostscan", "hostscan")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default number of concurrent probes.
    pub default_threads: i64,
    /// Default per-probe timeout in milliseconds.
    pub default_timeout_ms: u64,
    /// Default protocol for non-interactive scans.
    pub default_protocol: Protocol,
    /// Targets submitted per batch.
    pub batch_size: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_threads: 50,
            default_timeout_ms: 3000,
            default_protocol: Protocol::Http,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if there is none.
    pub fn load() -> ConfigResult<Self> {
        let Ok(paths) = Paths::new() else {
            return Ok(Self::default());
        };
        let file = paths.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Load from `path` if given, otherwise from the default location.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Default timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_threads, 50);
        assert_eq!(settings.timeout(), Duration::from_secs(3));
        assert_eq!(settings.batch_size, 10_000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_threads": 200, "default_protocol": "udp"}}"#).unwrap();

        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.default_threads, 200);
        assert_eq!(settings.default_protocol, Protocol::Udp);
        assert_eq!(settings.default_timeout_ms, 3000);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            AppSettings::resolve(Some(file.path())),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppSettings::load_from(&dir.path().join("nope.json")),
            Err(ConfigError::ReadFailed { .. })
        ));
    }
}
