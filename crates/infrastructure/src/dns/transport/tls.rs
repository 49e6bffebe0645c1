use super::{framing, DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsbox_domain::DomainError;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

static CLIENT_CONFIG: OnceLock<Arc<ClientConfig>> = OnceLock::new();

/// Shared client config trusting the webpki root set.
fn client_config() -> Result<Arc<ClientConfig>, DomainError> {
    if let Some(config) = CLIENT_CONFIG.get() {
        return Ok(Arc::clone(config));
    }

    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|e| DomainError::Transport(format!("TLS configuration failed: {}", e)))?
    .with_root_certificates(roots)
    .with_no_client_auth();

    Ok(Arc::clone(CLIENT_CONFIG.get_or_init(|| Arc::new(config))))
}

/// DNS over TLS (RFC 7858), one session per query.
pub struct TlsTransport {
    server_addr: SocketAddr,
    server_name: String,
}

impl TlsTransport {
    pub fn new(server_addr: SocketAddr, server_name: String) -> Self {
        Self {
            server_addr,
            server_name,
        }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let connector = TlsConnector::from(client_config()?);
        let server_name = ServerName::try_from(self.server_name.clone()).map_err(|e| {
            DomainError::Transport(format!("Invalid TLS server name {}: {}", self.server_name, e))
        })?;

        let tcp = TcpStream::connect(self.server_addr).await.map_err(|e| {
            DomainError::Transport(format!("TCP connect to {} failed: {}", self.server_addr, e))
        })?;
        tcp.set_nodelay(true).ok();

        let mut stream = connector.connect(server_name, tcp).await.map_err(|e| {
            DomainError::Transport(format!(
                "TLS handshake with {} ({}) failed: {}",
                self.server_name, self.server_addr, e
            ))
        })?;

        framing::exchange(&mut stream, message_bytes)
            .await
            .map_err(|e| {
                DomainError::Transport(format!(
                    "TLS exchange with {} failed: {}",
                    self.server_name, e
                ))
            })
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: format!("tls://{}", self.server_name),
            })??;

        debug!(
            server = %self.server_name,
            addr = %self.server_addr,
            bytes_received = bytes.len(),
            "DoT response received"
        );

        Ok(TransportResponse { bytes })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}
