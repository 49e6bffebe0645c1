use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

/// Creates all API routes with state. Mounted under `/api` by the server.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/domains",
            get(handlers::get_domains)
                .post(handlers::add_domains)
                .delete(handlers::remove_domains),
        )
        .route(
            "/suffixes",
            get(handlers::get_suffixes)
                .post(handlers::add_suffixes)
                .delete(handlers::remove_suffixes),
        )
        .route("/blocklist", get(handlers::get_blocklist))
        .route("/blocklist/refresh", post(handlers::refresh_blocklist))
        .route("/blocklist/sources", put(handlers::update_blocklist_sources))
        .route("/cache/stats", get(handlers::get_cache_stats))
        .with_state(state)
}
