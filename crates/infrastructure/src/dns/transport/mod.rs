pub mod framing;
pub mod https;
pub mod tcp;
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use dnsbox_domain::{DomainError, UpstreamScheme, UpstreamServer};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport, one variant per upstream scheme.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
    Tls(tls::TlsTransport),
    Https(https::HttpsTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tls(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Https(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => t.protocol_name(),
            Self::Tcp(t) => t.protocol_name(),
            Self::Tls(t) => t.protocol_name(),
            Self::Https(t) => t.protocol_name(),
        }
    }
}

/// Creates the transport for an upstream, resolving its host when the
/// scheme needs a socket address.
pub async fn create_transport(
    server: &UpstreamServer,
    timeout: Duration,
) -> Result<Transport, DomainError> {
    match server.scheme {
        UpstreamScheme::Udp => Ok(Transport::Udp(udp::UdpTransport::new(
            resolve_addr(server, timeout).await?,
        ))),
        UpstreamScheme::Tcp => Ok(Transport::Tcp(tcp::TcpTransport::new(
            resolve_addr(server, timeout).await?,
        ))),
        UpstreamScheme::Tls => Ok(Transport::Tls(tls::TlsTransport::new(
            resolve_addr(server, timeout).await?,
            server.host.clone(),
        ))),
        UpstreamScheme::Https => Ok(Transport::Https(https::HttpsTransport::new(
            server.https_url(),
        ))),
    }
}

/// IP literals are used as-is; host names go through the system resolver.
pub async fn resolve_addr(
    server: &UpstreamServer,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Ok(ip) = server.host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, server.port));
    }

    let mut addrs = tokio::time::timeout(
        timeout,
        tokio::net::lookup_host((server.host.as_str(), server.port)),
    )
    .await
    .map_err(|_| DomainError::TransportTimeout {
        server: server.to_string(),
    })?
    .map_err(|e| DomainError::Transport(format!("Failed to resolve {}: {}", server.host, e)))?;

    addrs
        .next()
        .ok_or_else(|| DomainError::Transport(format!("No address found for {}", server.host)))
}
