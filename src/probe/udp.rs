//! UDP echo-style probe.
//!
//! Sends a small datagram to the DNS port and treats any reply as proof of
//! life. The reply content is not inspected.

use super::{Deadline, HostResolver, Probe, ProbeError, ProbeOutcome, Protocol};
use crate::types::ProbeResult;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Payload sent to the target.
const UDP_PAYLOAD: &[u8] = b"ping";

/// Default destination port.
pub const UDP_PORT: u16 = 53;

/// Server label recorded on success.
pub const UDP_SERVER: &str = "UDP";

/// Status label recorded on success.
pub const UDP_STATUS: &str = "UDP OK";

/// UDP probe.
pub struct UdpProbe {
    resolver: Arc<HostResolver>,
    port: u16,
}

impl UdpProbe {
    /// Create a probe targeting port 53.
    pub fn new(resolver: Arc<HostResolver>) -> Self {
        Self {
            resolver,
            port: UDP_PORT,
        }
    }

    /// Target a different port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

#[async_trait]
impl Probe for UdpProbe {
    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    async fn try_probe(&self, host: &str, limit: Duration) -> ProbeOutcome<ProbeResult> {
        let deadline = Deadline::after(limit);
        let ip = self.resolver.resolve(host, deadline.remaining()).await?;

        // Bind to random local port
        let local_addr = match ip {
            IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let socket = UdpSocket::bind(local_addr).await?;

        socket.send_to(UDP_PAYLOAD, SocketAddr::new(ip, self.port)).await?;

        let mut buf = [0u8; 1024];
        timeout(deadline.remaining(), socket.recv_from(&mut buf))
            .await
            .map_err(|_| ProbeError::Timeout)??;

        Ok(ProbeResult::new(host)
            .with_ip(ip.to_string())
            .with_port(self.port)
            .with_server(UDP_SERVER)
            .with_status(UDP_STATUS))
    }
}
