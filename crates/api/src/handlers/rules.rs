use crate::state::AppState;
use axum::{extract::State, Json};
use dnsbox_application::use_cases::rules::parse_entries;
use dnsbox_domain::RuleKind;
use tracing::{debug, instrument};

async fn add(state: &AppState, kind: RuleKind, body: &str) -> String {
    let entries = parse_entries(body);
    state.add_rules.execute(kind, &entries).await.to_text()
}

async fn remove(state: &AppState, kind: RuleKind, body: &str) -> String {
    let entries = parse_entries(body);
    state.remove_rules.execute(kind, &entries).await.to_text()
}

#[instrument(skip(state), name = "api_get_domains")]
pub async fn get_domains(State(state): State<AppState>) -> Json<Vec<String>> {
    let domains = state.get_rules.execute(RuleKind::Domain);
    debug!(count = domains.len(), "Domains retrieved");
    Json(domains)
}

#[instrument(skip(state, body), name = "api_add_domains")]
pub async fn add_domains(State(state): State<AppState>, body: String) -> String {
    add(&state, RuleKind::Domain, &body).await
}

#[instrument(skip(state, body), name = "api_remove_domains")]
pub async fn remove_domains(State(state): State<AppState>, body: String) -> String {
    remove(&state, RuleKind::Domain, &body).await
}

#[instrument(skip(state), name = "api_get_suffixes")]
pub async fn get_suffixes(State(state): State<AppState>) -> Json<Vec<String>> {
    let suffixes = state.get_rules.execute(RuleKind::Suffix);
    debug!(count = suffixes.len(), "Suffixes retrieved");
    Json(suffixes)
}

#[instrument(skip(state, body), name = "api_add_suffixes")]
pub async fn add_suffixes(State(state): State<AppState>, body: String) -> String {
    add(&state, RuleKind::Suffix, &body).await
}

#[instrument(skip(state, body), name = "api_remove_suffixes")]
pub async fn remove_suffixes(State(state): State<AppState>, body: String) -> String {
    remove(&state, RuleKind::Suffix, &body).await
}
