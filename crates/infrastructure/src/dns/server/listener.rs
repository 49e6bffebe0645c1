use super::handler::DnsQueryHandler;
use dnsbox_domain::DomainError;
use futures::future::join_all;
use hickory_server::ServerFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const TCP_TIMEOUT: Duration = Duration::from_secs(10);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// UDP and TCP listeners, one task per bound address.
pub struct DnsListener {
    tasks: Vec<(SocketAddr, JoinHandle<()>)>,
}

impl DnsListener {
    /// Binds every address and starts serving. Addresses that fail to bind
    /// are logged and skipped; it is an error only when none bind.
    pub async fn start(
        addrs: &[SocketAddr],
        handler: DnsQueryHandler,
        shutdown: CancellationToken,
    ) -> Result<Self, DomainError> {
        let mut tasks = Vec::with_capacity(addrs.len());

        for &addr in addrs {
            let (addr, server) = match bind(addr, handler.clone()).await {
                Ok(bound) => bound,
                Err(e) => {
                    error!(bind_address = %addr, error = %e, "Failed to bind DNS listener");
                    continue;
                }
            };
            info!(bind_address = %addr, "DNS listener ready (UDP + TCP)");

            let shutdown = shutdown.clone();
            let handle = tokio::spawn(serve(addr, server, shutdown));
            tasks.push((addr, handle));
        }

        if tasks.is_empty() {
            return Err(DomainError::IoError(
                "no DNS listen address could be bound".to_string(),
            ));
        }

        Ok(Self { tasks })
    }

    /// Bound addresses, with port 0 resolved.
    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.tasks.iter().map(|(addr, _)| *addr).collect()
    }

    /// Waits for every listener task to finish.
    pub async fn wait(self) {
        let (addrs, handles): (Vec<_>, Vec<_>) = self.tasks.into_iter().unzip();
        for (addr, result) in addrs.iter().zip(join_all(handles).await) {
            if let Err(e) = result {
                error!(bind_address = %addr, error = %e, "DNS listener task panicked");
            }
        }
        info!("DNS listeners stopped");
    }
}

async fn bind(
    addr: SocketAddr,
    handler: DnsQueryHandler,
) -> Result<(SocketAddr, ServerFuture<DnsQueryHandler>), DomainError> {
    let udp_socket = UdpSocket::bind(addr)
        .await
        .map_err(|e| DomainError::IoError(format!("UDP bind {}: {}", addr, e)))?;
    // port 0 resolves to the UDP port so both protocols share it
    let addr = udp_socket
        .local_addr()
        .map_err(|e| DomainError::IoError(format!("UDP bind {}: {}", addr, e)))?;
    let tcp_listener = TcpListener::bind(addr)
        .await
        .map_err(|e| DomainError::IoError(format!("TCP bind {}: {}", addr, e)))?;

    let mut server = ServerFuture::new(handler);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, TCP_TIMEOUT);
    Ok((addr, server))
}

async fn serve(
    addr: SocketAddr,
    mut server: ServerFuture<DnsQueryHandler>,
    shutdown: CancellationToken,
) {
    tokio::select! {
        result = server.block_until_done() => {
            if let Err(e) = result {
                error!(bind_address = %addr, error = %e, "DNS listener stopped with error");
            }
            return;
        }
        _ = shutdown.cancelled() => {
            info!(bind_address = %addr, "Shutting down DNS listener");
        }
    }

    match tokio::time::timeout(SHUTDOWN_GRACE, server.shutdown_gracefully()).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => warn!(bind_address = %addr, error = %e, "DNS listener shutdown error"),
        Err(_) => warn!(bind_address = %addr, "DNS listener shutdown timed out"),
    }
}
