//! HTTP-family probes.
//!
//! The HTTP, SSL and WebSocket variants share one implementation and differ
//! only in the URL scheme they start from and the port they record:
//!
//! | Variant | URL            | Recorded port |
//! |---------|----------------|---------------|
//! | HTTP    | `http://host`  | 80            |
//! | SSL     | `http://host`  | 443           |
//! | WS      | `ws://host`    | 80            |
//!
//! SSL does not negotiate TLS and WS does not perform an upgrade handshake.
//! Both reduce to a plain GET, and any response at all counts as success.

use super::{Deadline, HostResolver, Probe, ProbeError, ProbeOutcome, Protocol};
use crate::types::ProbeResult;
use async_trait::async_trait;
use reqwest::header::SERVER;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Server label used when the response carries no `Server` header.
pub const UNKNOWN_SERVER: &str = "Unknown";

const USER_AGENT: &str = concat!("hostscan/", env!("CARGO_PKG_VERSION"));

/// Plain GET probe for the HTTP, SSL and WebSocket protocols.
pub struct HttpProbe {
    client: Client,
    resolver: Arc<HostResolver>,
    protocol: Protocol,
    scheme: &'static str,
    recorded_port: u16,
    connect_port: Option<u16>,
}

impl HttpProbe {
    fn build(
        resolver: Arc<HostResolver>,
        protocol: Protocol,
        scheme: &'static str,
        recorded_port: u16,
    ) -> ProbeOutcome<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(|e| ProbeError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            resolver,
            protocol,
            scheme,
            recorded_port,
            connect_port: None,
        })
    }

    /// Plain HTTP probe.
    pub fn http(resolver: Arc<HostResolver>) -> ProbeOutcome<Self> {
        Self::build(resolver, Protocol::Http, "http", 80)
    }

    /// HTTP probe recorded against port 443.
    pub fn ssl(resolver: Arc<HostResolver>) -> ProbeOutcome<Self> {
        Self::build(resolver, Protocol::Ssl, "http", 443)
    }

    /// HTTP probe built from a `ws://` URL.
    pub fn websocket(resolver: Arc<HostResolver>) -> ProbeOutcome<Self> {
        Self::build(resolver, Protocol::Ws, "ws", 80)
    }

    /// Send requests to `port` instead of the scheme default.
    ///
    /// The recorded port is unchanged.
    pub fn with_connect_port(mut self, port: u16) -> Self {
        self.connect_port = Some(port);
        self
    }

    /// The URL actually requested for `host`.
    ///
    /// A `ws://` URL is sent over its plain HTTP equivalent.
    pub fn request_url(&self, host: &str) -> ProbeOutcome<Url> {
        let mut url = Url::parse(&format!("{}://{}", self.scheme, host))
            .map_err(|e| ProbeError::InvalidUrl(format!("{}: {}", host, e)))?;

        if url.scheme() == "ws" {
            url.set_scheme("http")
                .map_err(|_| ProbeError::InvalidUrl(url.to_string()))?;
        }
        if let Some(port) = self.connect_port {
            url.set_port(Some(port))
                .map_err(|_| ProbeError::InvalidUrl(url.to_string()))?;
        }

        Ok(url)
    }
}

#[async_trait]
impl Probe for HttpProbe {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn try_probe(&self, host: &str, timeout: Duration) -> ProbeOutcome<ProbeResult> {
        let deadline = Deadline::after(timeout);
        let ip = self.resolver.resolve(host, deadline.remaining()).await?;
        let url = self.request_url(host)?;

        trace!(%url, "sending request");
        let response = self
            .client
            .get(url)
            .timeout(deadline.remaining())
            .send()
            .await?;

        let server = response
            .headers()
            .get(SERVER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(UNKNOWN_SERVER)
            .to_string();

        Ok(ProbeResult::new(host)
            .with_ip(ip.to_string())
            .with_server(server)
            .with_port(self.recorded_port)
            .with_status(response.status().as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProbeStatus;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a loopback port.
    async fn serve_once(response: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        port
    }

    fn resolver() -> Arc<HostResolver> {
        Arc::new(HostResolver::new())
    }

    #[tokio::test]
    async fn test_request_urls() {
        let http = HttpProbe::http(resolver()).unwrap();
        assert_eq!(http.request_url("example.com").unwrap().as_str(), "http://example.com/");

        let ws = HttpProbe::websocket(resolver()).unwrap();
        assert_eq!(ws.request_url("example.com").unwrap().as_str(), "http://example.com/");

        let ssl = HttpProbe::ssl(resolver()).unwrap().with_connect_port(8443);
        assert_eq!(ssl.request_url("10.0.0.1").unwrap().as_str(), "http://10.0.0.1:8443/");
    }

    #[tokio::test]
    async fn test_invalid_host_url() {
        let http = HttpProbe::http(resolver()).unwrap();
        assert!(matches!(
            http.request_url("bad host name"),
            Err(ProbeError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_http_probe_records_server_and_status() {
        let port = serve_once(
            "HTTP/1.1 404 Not Found\r\nServer: test-srv\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let probe = HttpProbe::http(resolver()).unwrap().with_connect_port(port);

        let result = probe
            .probe("127.0.0.1", Duration::from_secs(2))
            .await
            .expect("loopback server should answer");

        assert_eq!(result.host, "127.0.0.1");
        assert_eq!(result.ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(result.server.as_deref(), Some("test-srv"));
        assert_eq!(result.port, Some(80));
        assert_eq!(result.status, Some(ProbeStatus::Code(404)));
    }

    #[tokio::test]
    async fn test_ssl_probe_without_server_header() {
        let port = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let probe = HttpProbe::ssl(resolver()).unwrap().with_connect_port(port);

        let result = probe.probe("127.0.0.1", Duration::from_secs(2)).await.unwrap();
        assert_eq!(result.server.as_deref(), Some(UNKNOWN_SERVER));
        assert_eq!(result.port, Some(443));
        assert_eq!(result.status, Some(ProbeStatus::Code(200)));
    }

    #[tokio::test]
    async fn test_websocket_probe_uses_plain_request() {
        let port = serve_once("HTTP/1.1 426 Upgrade Required\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let probe = HttpProbe::websocket(resolver()).unwrap().with_connect_port(port);

        let result = probe.probe("127.0.0.1", Duration::from_secs(2)).await.unwrap();
        assert_eq!(result.port, Some(80));
        assert_eq!(result.status, Some(ProbeStatus::Code(426)));
    }

    #[tokio::test]
    async fn test_silent_server_stays_within_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let _held = listener.accept().await;
            std::future::pending::<()>().await;
        });

        let probe = HttpProbe::http(resolver()).unwrap().with_connect_port(port);
        let start = std::time::Instant::now();
        assert!(probe.probe("127.0.0.1", Duration::from_millis(300)).await.is_none());
        assert!(start.elapsed() < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_refused_connection_is_absent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = HttpProbe::http(resolver()).unwrap().with_connect_port(port);
        assert!(probe.probe("127.0.0.1", Duration::from_millis(500)).await.is_none());
    }
}
