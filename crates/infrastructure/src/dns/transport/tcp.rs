use super::{framing, DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsbox_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP, one connection per query.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut stream = TcpStream::connect(self.server_addr).await.map_err(|e| {
            DomainError::Transport(format!("TCP connect to {} failed: {}", self.server_addr, e))
        })?;
        stream.set_nodelay(true).ok();

        framing::exchange(&mut stream, message_bytes)
            .await
            .map_err(|e| {
                DomainError::Transport(format!(
                    "TCP exchange with {} failed: {}",
                    self.server_addr, e
                ))
            })
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: format!("tcp://{}", self.server_addr),
            })??;

        debug!(server = %self.server_addr, bytes_received = bytes.len(), "TCP response received");

        Ok(TransportResponse { bytes })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
