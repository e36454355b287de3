//! Probe outcome records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status reported by a successful probe.
///
/// HTTP-family probes carry the numeric response code, socket-level probes
/// carry a short label such as `UDP OK`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeStatus {
    /// Numeric HTTP status code.
    Code(u16),
    /// Free-form status label.
    Label(String),
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Label(label) => write!(f, "{}", label),
        }
    }
}

impl From<u16> for ProbeStatus {
    fn from(code: u16) -> Self {
        Self::Code(code)
    }
}

impl From<&str> for ProbeStatus {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// Outcome of one successful probe against one host.
///
/// Absent fields mean partial success: a host whose name resolved but whose
/// port did not answer keeps its `ip` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The target exactly as it was submitted.
    pub host: String,
    /// Resolved address.
    pub ip: Option<String>,
    /// Server label (HTTP `Server` header or a protocol tag).
    pub server: Option<String>,
    /// Port the probe is recorded against.
    pub port: Option<u16>,
    /// Response status.
    pub status: Option<ProbeStatus>,
}

impl ProbeResult {
    /// Create an empty result for `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ip: None,
            server: None,
            port: None,
            status: None,
        }
    }

    /// Set the resolved address.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Set the server label.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: impl Into<ProbeStatus>) -> Self {
        self.status = Some(status.into());
        self
    }
}
