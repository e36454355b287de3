//! TCP connect probe.
//!
//! Completes a full handshake with port 80. A host whose name resolves but
//! whose port does not accept is still reported, with only its address
//! filled in.

use super::{Deadline, HostResolver, Probe, ProbeOutcome, Protocol};
use crate::types::ProbeResult;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Default destination port.
pub const TCP_PORT: u16 = 80;

/// Server label recorded on a completed handshake.
pub const TCP_SERVER: &str = "HTTP";

/// Status label recorded on a completed handshake.
pub const TCP_STATUS: &str = "Open";

/// TCP connect probe.
pub struct TcpConnectProbe {
    resolver: Arc<HostResolver>,
    port: u16,
}

impl TcpConnectProbe {
    /// Create a probe targeting port 80.
    pub fn new(resolver: Arc<HostResolver>) -> Self {
        Self {
            resolver,
            port: TCP_PORT,
        }
    }

    /// Target a different port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

#[async_trait]
impl Probe for TcpConnectProbe {
    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    async fn try_probe(&self, host: &str, limit: Duration) -> ProbeOutcome<ProbeResult> {
        let deadline = Deadline::after(limit);
        let ip = self.resolver.resolve(host, deadline.remaining()).await?;
        let result = ProbeResult::new(host).with_ip(ip.to_string());
        let addr = SocketAddr::new(ip, self.port);

        match timeout(deadline.remaining(), TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(result
                    .with_port(self.port)
                    .with_server(TCP_SERVER)
                    .with_status(TCP_STATUS))
            }
            Ok(Err(e)) => {
                debug!(host, %addr, error = %e, "connect failed");
                Ok(result)
            }
            Err(_) => {
                debug!(host, %addr, "connect timed out");
                Ok(result)
            }
        }
    }
}
