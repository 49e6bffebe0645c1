use crate::dns::forwarding::{DnsResponse, ResponseParser};
use crate::dns::transport::{self, tcp::TcpTransport, DnsTransport};
use dnsbox_domain::{DomainError, UpstreamScheme, UpstreamServer};
use std::time::{Duration, Instant};
use tracing::debug;

pub struct QueryAttemptResult {
    pub response: DnsResponse,
    pub protocol: &'static str,
    pub latency_ms: u64,
}

/// Sends one query to one upstream.
///
/// Succeeds only with a NOERROR reply matching `query_id`. A truncated UDP
/// reply is retried once over TCP to the same server. Host resolution, the
/// exchange and any retry share one `timeout` budget.
pub async fn query_server(
    server: &UpstreamServer,
    query_bytes: &[u8],
    query_id: u16,
    timeout: Duration,
) -> Result<QueryAttemptResult, DomainError> {
    let start = Instant::now();
    let deadline = start + timeout;

    let dns_transport = transport::create_transport(server, remaining(server, deadline)?).await?;
    let mut protocol = dns_transport.protocol_name();
    let transport_response = dns_transport
        .send(query_bytes, remaining(server, deadline)?)
        .await?;
    let mut response = ResponseParser::parse(&transport_response.bytes, query_id)?;

    if response.truncated && server.scheme == UpstreamScheme::Udp {
        debug!(server = %server, "Response truncated (TC bit), retrying via TCP");

        let addr = transport::resolve_addr(server, remaining(server, deadline)?).await?;
        let tcp = TcpTransport::new(addr);
        let tcp_response =
            DnsTransport::send(&tcp, query_bytes, remaining(server, deadline)?).await?;

        response = ResponseParser::parse(&tcp_response.bytes, query_id)?;
        protocol = tcp.protocol_name();
    }

    if !response.is_success() {
        return Err(DomainError::UpstreamStatus {
            server: server.to_string(),
            rcode: ResponseParser::rcode_to_status(response.rcode).to_string(),
        });
    }

    Ok(QueryAttemptResult {
        response,
        protocol,
        latency_ms: start.elapsed().as_millis() as u64,
    })
}

fn remaining(server: &UpstreamServer, deadline: Instant) -> Result<Duration, DomainError> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(DomainError::TransportTimeout {
            server: server.to_string(),
        });
    }
    Ok(left)
}
