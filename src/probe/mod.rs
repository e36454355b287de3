//! Probe strategies.
//!
//! A probe performs one reachability check against one host and reports
//! either a [`ProbeResult`] or nothing. All network failures are absorbed
//! here: callers of [`Probe::probe`] never see an I/O error, only absence.
//!
//! Strategies are a closed set keyed by [`Protocol`]. Pick one with
//! [`Protocol::strategy`] when a scan is set up.

pub mod http;
pub mod resolve;
pub mod tcp;
pub mod udp;

use crate::types::ProbeResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

pub use http::HttpProbe;
pub use resolve::HostResolver;
pub use tcp::TcpConnectProbe;
pub use udp::UdpProbe;

/// Reasons a single probe can fail. Never surfaced past [`Probe::probe`].
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("DNS resolution failed for '{0}': {1}")]
    Resolve(String, String),

    #[error("no addresses found for '{0}'")]
    NoAddress(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out")]
    Timeout,

    #[error("failed to build client: {0}")]
    Setup(String),
}

/// Result type alias for probe internals.
pub type ProbeOutcome<T> = Result<T, ProbeError>;

/// One time budget shared by every step of a probe.
///
/// Resolution and the request draw from the same budget, so a probe never
/// runs longer than the timeout it was given.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Self {
            at: Instant::now() + limit,
        }
    }

    /// Time left, or zero once the deadline has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}

/// The protocols a scan can probe with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain HTTP GET, recorded on port 80.
    #[default]
    Http,
    /// Plain HTTP GET, recorded on port 443. No TLS handshake is checked.
    Ssl,
    /// HTTP GET built from a `ws://` URL, recorded on port 80. No upgrade is attempted.
    Ws,
    /// Datagram to port 53; any reply counts.
    Udp,
    /// TCP connect to port 80.
    Tcp,
}

/// Menu choice, name and label for every protocol.
const PROTOCOL_TABLE: &[(&str, &str, Protocol)] = &[
    ("1", "HTTP", Protocol::Http),
    ("2", "SSL", Protocol::Ssl),
    ("3", "WebSocket (WS)", Protocol::Ws),
    ("4", "UDP", Protocol::Udp),
    ("5", "TCP connect", Protocol::Tcp),
];

impl Protocol {
    /// Menu entries as `(choice, description)` pairs, in display order.
    pub fn menu() -> impl Iterator<Item = (&'static str, &'static str)> {
        PROTOCOL_TABLE.iter().map(|(choice, label, _)| (*choice, *label))
    }

    /// Map an interactive menu choice to a protocol.
    pub fn from_choice(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        PROTOCOL_TABLE
            .iter()
            .find(|(key, _, _)| *key == choice)
            .map(|(_, _, protocol)| *protocol)
    }

    /// Build the probe strategy for this protocol.
    pub fn strategy(self, resolver: Arc<HostResolver>) -> ProbeOutcome<BoxedProbe> {
        let probe: BoxedProbe = match self {
            Self::Http => Arc::new(HttpProbe::http(resolver)?),
            Self::Ssl => Arc::new(HttpProbe::ssl(resolver)?),
            Self::Ws => Arc::new(HttpProbe::websocket(resolver)?),
            Self::Udp => Arc::new(UdpProbe::new(resolver)),
            Self::Tcp => Arc::new(TcpConnectProbe::new(resolver)),
        };
        Ok(probe)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "HTTP"),
            Self::Ssl => write!(f, "SSL"),
            Self::Ws => write!(f, "WS"),
            Self::Udp => write!(f, "UDP"),
            Self::Tcp => write!(f, "TCP"),
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "ssl" | "https" => Ok(Self::Ssl),
            "ws" | "websocket" => Ok(Self::Ws),
            "udp" => Ok(Self::Udp),
            "tcp" | "connect" => Ok(Self::Tcp),
            _ => Err(format!("unknown protocol: {}", s)),
        }
    }
}

/// A single-host reachability check.
#[async_trait]
pub trait Probe: Send + Sync {
    /// The protocol this probe implements.
    fn protocol(&self) -> Protocol;

    /// Run the check, reporting why it failed.
    async fn try_probe(&self, host: &str, timeout: Duration) -> ProbeOutcome<ProbeResult>;

    /// Run the check, reducing every failure to `None`.
    async fn probe(&self, host: &str, timeout: Duration) -> Option<ProbeResult> {
        match self.try_probe(host, timeout).await {
            Ok(result) => Some(result),
            Err(e) => {
                debug!(host, protocol = %self.protocol(), error = %e, "probe failed");
                None
            }
        }
    }
}

/// A shared probe for dynamic dispatch across worker tasks.
pub type BoxedProbe = Arc<dyn Probe>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_from_choice() {
        assert_eq!(Protocol::from_choice("1"), Some(Protocol::Http));
        assert_eq!(Protocol::from_choice("2"), Some(Protocol::Ssl));
        assert_eq!(Protocol::from_choice("3"), Some(Protocol::Ws));
        assert_eq!(Protocol::from_choice(" 4\n"), Some(Protocol::Udp));
        assert_eq!(Protocol::from_choice("5"), Some(Protocol::Tcp));
        assert_eq!(Protocol::from_choice("9"), None);
        assert_eq!(Protocol::from_choice("http"), None);
    }

    #[test]
    fn test_protocol_from_str() {
        assert_eq!("http".parse::<Protocol>().unwrap(), Protocol::Http);
        assert_eq!("HTTPS".parse::<Protocol>().unwrap(), Protocol::Ssl);
        assert_eq!("websocket".parse::<Protocol>().unwrap(), Protocol::Ws);
        assert!("icmp".parse::<Protocol>().is_err());
    }

    #[tokio::test]
    async fn test_deadline_shrinks_across_steps() {
        let deadline = Deadline::after(Duration::from_millis(300));
        tokio::time::sleep(Duration::from_millis(120)).await;

        let left = deadline.remaining();
        assert!(left <= Duration::from_millis(180));
        assert!(left > Duration::ZERO);

        tokio::time::sleep(left + Duration::from_millis(20)).await;
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_default_protocol_is_http() {
        assert_eq!(Protocol::default(), Protocol::Http);
    }

    #[test]
    fn test_menu_order() {
        let choices: Vec<&str> = Protocol::menu().map(|(choice, _)| choice).collect();
        assert_eq!(choices, vec!["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_strategy_lookup_matches_protocol() {
        let resolver = Arc::new(HostResolver::new());
        for protocol in [
            Protocol::Http,
            Protocol::Ssl,
            Protocol::Ws,
            Protocol::Udp,
            Protocol::Tcp,
        ] {
            let probe = protocol.strategy(Arc::clone(&resolver)).unwrap();
            assert_eq!(probe.protocol(), protocol);
        }
    }
}
