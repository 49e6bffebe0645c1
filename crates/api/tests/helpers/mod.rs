#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use dnsbox_api::{create_api_routes, AppState};
use dnsbox_application::ports::{BlocklistPort, ConfigStore};
use dnsbox_application::use_cases::{
    AddRulesUseCase, ForceBlocklistRefreshUseCase, GetBlocklistStatusUseCase,
    GetCacheStatsUseCase, GetRulesUseCase, RemoveRulesUseCase, UpdateBlocklistSourcesUseCase,
};
use dnsbox_domain::{DomainError, MutableSections, MutableSnapshot};
use dnsbox_infrastructure::dns::{BlocklistManager, PolicySet, ResponseCache, SharedPolicySet};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

// ============================================================================
// Recording ConfigStore
// ============================================================================

#[derive(Default)]
pub struct RecordingConfigStore {
    saved: Mutex<Vec<MutableSnapshot>>,
}

impl RecordingConfigStore {
    pub fn saves(&self) -> Vec<MutableSnapshot> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigStore for RecordingConfigStore {
    async fn save(&self, sections: &MutableSections) -> Result<(), DomainError> {
        self.saved.lock().unwrap().push(sections.snapshot());
        Ok(())
    }
}

// ============================================================================
// Test application
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub policy: Arc<SharedPolicySet>,
    pub sections: Arc<MutableSections>,
    pub cache: Arc<ResponseCache>,
    pub blocklist: Option<Arc<BlocklistManager>>,
    pub store: Arc<RecordingConfigStore>,
}

impl TestApp {
    pub fn new(with_blocklist: bool) -> Self {
        let sections = Arc::new(MutableSections::new(MutableSnapshot {
            domains: vec!["example.org".to_string()],
            suffixes: vec![".example.com".to_string()],
            blocklist_urls: vec!["/etc/dnsbox/hosts".to_string()],
        }));
        let snapshot = sections.snapshot();
        let policy = Arc::new(SharedPolicySet::new(PolicySet::from_rules(
            &snapshot.domains,
            &snapshot.suffixes,
        )));
        let cache = Arc::new(ResponseCache::new());
        let store = Arc::new(RecordingConfigStore::default());
        let blocklist = with_blocklist.then(|| {
            Arc::new(BlocklistManager::new(
                snapshot.blocklist_urls.clone(),
                Duration::from_secs(3600),
            ))
        });
        let blocklist_port = blocklist
            .clone()
            .map(|b| b as Arc<dyn BlocklistPort>);

        let state = AppState {
            get_rules: Arc::new(GetRulesUseCase::new(sections.clone())),
            add_rules: Arc::new(AddRulesUseCase::new(
                policy.clone(),
                sections.clone(),
                store.clone(),
            )),
            remove_rules: Arc::new(RemoveRulesUseCase::new(
                policy.clone(),
                sections.clone(),
                store.clone(),
            )),
            get_blocklist_status: Arc::new(GetBlocklistStatusUseCase::new(
                blocklist_port.clone(),
            )),
            force_blocklist_refresh: Arc::new(ForceBlocklistRefreshUseCase::new(
                blocklist_port.clone(),
            )),
            update_blocklist_sources: Arc::new(UpdateBlocklistSourcesUseCase::new(
                blocklist_port,
                sections.clone(),
                store.clone(),
            )),
            get_cache_stats: Arc::new(GetCacheStatsUseCase::new(cache.clone())),
        };

        Self {
            router: create_api_routes(state),
            policy,
            sections,
            cache,
            blocklist,
            store,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "text/plain")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.call(request).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
