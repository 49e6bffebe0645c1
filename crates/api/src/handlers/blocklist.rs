use crate::{dto::BlocklistStatusResponse, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use dnsbox_domain::DomainError;
use tracing::{debug, error, instrument};

#[instrument(skip(state), name = "api_get_blocklist")]
pub async fn get_blocklist(State(state): State<AppState>) -> Json<BlocklistStatusResponse> {
    debug!("Fetching blocklist status");
    Json(state.get_blocklist_status.execute().into())
}

#[instrument(skip(state), name = "api_refresh_blocklist")]
pub async fn refresh_blocklist(State(state): State<AppState>) -> (StatusCode, String) {
    match state.force_blocklist_refresh.execute() {
        Ok(()) => (StatusCode::ACCEPTED, "refresh scheduled".to_string()),
        Err(DomainError::NotFound(message)) => (StatusCode::NOT_FOUND, message),
        Err(e) => {
            error!(error = %e, "Failed to schedule blocklist refresh");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[instrument(skip(state, sources), name = "api_update_blocklist_sources")]
pub async fn update_blocklist_sources(
    State(state): State<AppState>,
    Json(sources): Json<Vec<String>>,
) -> StatusCode {
    debug!(count = sources.len(), "Updating blocklist sources");
    state.update_blocklist_sources.execute(sources).await;
    StatusCode::NO_CONTENT
}
