//! Hostname resolution shared by every probe.

use super::{ProbeError, ProbeOutcome};
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::timeout;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Resolves target names to a single address, preferring IPv4.
pub struct HostResolver {
    resolver: TokioAsyncResolver,
}

impl HostResolver {
    /// Use the system resolver configuration, falling back to public defaults.
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }

    /// Resolve `host`, giving up after `limit`.
    ///
    /// Address literals are returned as-is without a lookup.
    pub async fn resolve(&self, host: &str, limit: Duration) -> ProbeOutcome<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let response = timeout(limit, self.resolver.lookup_ip(host))
            .await
            .map_err(|_| ProbeError::Timeout)?
            .map_err(|e| ProbeError::Resolve(host.to_string(), e.to_string()))?;

        let ips: Vec<IpAddr> = response.iter().collect();
        ips.iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| ips.first())
            .copied()
            .ok_or_else(|| ProbeError::NoAddress(host.to_string()))
    }
}

impl Default for HostResolver {
    fn default() -> Self {
        Self::new()
    }
}
