use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnsbox_domain::DomainError;
use reqwest::StatusCode;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Content type for DNS-over-HTTPS requests and responses (RFC 8484 §6)
const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// DNS-over-HTTPS transport (RFC 8484), POST with a wire-format body.
pub struct HttpsTransport {
    url: String,
}

impl HttpsTransport {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.url.clone(),
        }
    }
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(url = %self.url, message_len = message_bytes.len(), "Sending DoH query");

        let deadline = tokio::time::Instant::now() + timeout;
        let response = tokio::time::timeout_at(
            deadline,
            SHARED_CLIENT
                .post(&self.url)
                .header("Content-Type", DNS_MESSAGE_CONTENT_TYPE)
                .header("Accept", DNS_MESSAGE_CONTENT_TYPE)
                .body(Bytes::copy_from_slice(message_bytes))
                .send(),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(|e| DomainError::Transport(format!("DoH request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DomainError::Transport(format!(
                "DoH server {} returned HTTP {}",
                self.url,
                status.as_u16()
            )));
        }

        let response_bytes: Bytes = tokio::time::timeout_at(deadline, response.bytes())
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| {
                DomainError::Transport(format!(
                    "Failed to read DoH response from {}: {}",
                    self.url, e
                ))
            })?;

        debug!(url = %self.url, response_len = response_bytes.len(), "DoH response received");

        Ok(TransportResponse {
            bytes: response_bytes.to_vec(),
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}
