#![allow(dead_code)]

use async_trait::async_trait;
use dnsbox_application::ports::{BlocklistPort, ConfigStore, PolicyPort};
use dnsbox_domain::{BlocklistStatus, DomainError, MutableSections, MutableSnapshot, RuleKind};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock PolicyPort
// ============================================================================

#[derive(Default)]
pub struct MockPolicy {
    entries: Mutex<HashSet<String>>,
}

impl MockPolicy {
    pub fn with_entries(kind: RuleKind, entries: &[&str]) -> Self {
        let policy = Self::default();
        for entry in entries {
            policy.add(kind, entry);
        }
        policy
    }
}

impl PolicyPort for MockPolicy {
    fn add(&self, kind: RuleKind, entry: &str) -> bool {
        self.entries.lock().unwrap().insert(kind.normalize(entry))
    }

    fn remove(&self, kind: RuleKind, entry: &str) -> bool {
        self.entries.lock().unwrap().remove(&kind.normalize(entry))
    }

    fn contains(&self, kind: RuleKind, entry: &str) -> bool {
        self.entries.lock().unwrap().contains(&kind.normalize(entry))
    }

    fn should_process(&self, name: &str) -> bool {
        self.contains(RuleKind::Domain, name)
    }
}

// ============================================================================
// Mock ConfigStore
// ============================================================================

#[derive(Default)]
pub struct RecordingConfigStore {
    saved: Mutex<Vec<MutableSnapshot>>,
    fail: bool,
}

impl RecordingConfigStore {
    pub fn failing() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn saves(&self) -> Vec<MutableSnapshot> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigStore for RecordingConfigStore {
    async fn save(&self, sections: &MutableSections) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::IoError("disk full".to_string()));
        }
        self.saved.lock().unwrap().push(sections.snapshot());
        Ok(())
    }
}

// ============================================================================
// Mock BlocklistPort
// ============================================================================

#[derive(Default)]
pub struct MockBlocklist {
    pub forced: AtomicUsize,
    sources: Mutex<Vec<String>>,
}

impl MockBlocklist {
    pub fn forced_count(&self) -> usize {
        self.forced.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlocklistPort for MockBlocklist {
    fn is_blocked(&self, _name: &str) -> bool {
        false
    }

    fn force_refresh(&self) {
        self.forced.fetch_add(1, Ordering::SeqCst);
    }

    fn status(&self) -> BlocklistStatus {
        BlocklistStatus {
            last_refreshed_at: None,
            domain_count: 42,
            sources: self.sources.lock().unwrap().clone(),
        }
    }

    fn update_sources(&self, sources: Vec<String>) {
        *self.sources.lock().unwrap() = sources;
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(3600)
    }

    async fn refresh(&self) -> usize {
        0
    }

    async fn refresh_requested(&self) {
        std::future::pending::<()>().await
    }
}
