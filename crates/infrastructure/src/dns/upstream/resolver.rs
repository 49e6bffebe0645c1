use super::query::query_server;
use crate::dns::forwarding::MessageBuilder;
use dnsbox_domain::{sort_by_priority, DomainError, UpstreamServer};
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RecordType};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Forwards queries to the configured upstreams in transport priority order
/// (DoH, DoT, TCP, UDP) and returns the first NOERROR reply.
pub struct UpstreamResolver {
    servers: Vec<String>,
    timeout: Duration,
}

impl UpstreamResolver {
    pub fn new(servers: Vec<String>, timeout: Duration) -> Self {
        Self { servers, timeout }
    }

    /// `None` when every upstream failed.
    pub async fn resolve(&self, name: &Name, record_type: RecordType) -> Option<Message> {
        let (query_id, query_bytes) = match MessageBuilder::build_query(name, record_type) {
            Ok(query) => query,
            Err(e) => {
                error!(domain = %name, error = %e, "Failed to build upstream query");
                return None;
            }
        };

        for raw in sort_by_priority(&self.servers) {
            match self.try_server(raw, &query_bytes, query_id).await {
                Ok(message) => {
                    debug!(domain = %name, server = raw, "Resolved upstream");
                    return Some(message);
                }
                Err(e) => {
                    warn!(domain = %name, server = raw, error = %e, "Upstream query failed");
                }
            }
        }

        error!(domain = %name, record_type = %record_type, "All upstream servers failed");
        None
    }

    async fn try_server(
        &self,
        raw: &str,
        query_bytes: &[u8],
        query_id: u16,
    ) -> Result<Message, DomainError> {
        let server = UpstreamServer::parse(raw)?;
        let result = query_server(&server, query_bytes, query_id, self.timeout).await?;
        debug!(
            server = %server,
            protocol = result.protocol,
            latency_ms = result.latency_ms,
            "Upstream answered"
        );
        Ok(result.response.message)
    }
}
