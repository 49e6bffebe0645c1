use axum::Router;
use dnsbox_api::{create_api_routes, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Binds the management API and serves it until `shutdown` fires.
pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<JoinHandle<()>> {
    let app = Router::new()
        .nest("/api", create_api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(bind_addr).await?;
    info!(bind_address = %bind_addr, "Management API listening");

    Ok(tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;
        match result {
            Ok(()) => info!("Management API stopped"),
            Err(e) => error!(error = %e, "Management API failed"),
        }
    }))
}
