use dnsbox_infrastructure::dns::{DnsListener, DnsQueryHandler};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_dns_server(
    listen: &[SocketAddr],
    handler: DnsQueryHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<DnsListener> {
    info!(addresses = listen.len(), "Starting DNS server");

    let listener = DnsListener::start(listen, handler, shutdown).await?;

    info!(bound = ?listener.local_addrs(), "DNS server ready to accept queries");
    Ok(listener)
}
