#![allow(dead_code)]

use async_trait::async_trait;
use dnsbox_application::ports::BlocklistPort;
use dnsbox_domain::BlocklistStatus;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock BlocklistPort
// ============================================================================

pub struct MockBlocklist {
    refreshes: AtomicUsize,
    requested: Notify,
    interval: Duration,
    slow_refresh: Option<Duration>,
}

impl MockBlocklist {
    pub fn new(interval: Duration) -> Self {
        Self {
            refreshes: AtomicUsize::new(0),
            requested: Notify::new(),
            interval,
            slow_refresh: None,
        }
    }

    /// Every refresh after the first sleeps for `delay` once counted.
    pub fn with_slow_refresh(mut self, delay: Duration) -> Self {
        self.slow_refresh = Some(delay);
        self
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// Polls until at least `n` refreshes ran or `within` elapses.
    pub async fn wait_for_refreshes(&self, n: usize, within: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + within;
        while tokio::time::Instant::now() < deadline {
            if self.refresh_count() >= n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.refresh_count() >= n
    }
}

#[async_trait]
impl BlocklistPort for MockBlocklist {
    fn is_blocked(&self, _name: &str) -> bool {
        false
    }

    fn force_refresh(&self) {
        self.requested.notify_one();
    }

    fn status(&self) -> BlocklistStatus {
        BlocklistStatus::default()
    }

    fn update_sources(&self, _sources: Vec<String>) {}

    fn refresh_interval(&self) -> Duration {
        self.interval
    }

    async fn refresh(&self) -> usize {
        let count = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.slow_refresh.filter(|_| count > 1) {
            tokio::time::sleep(delay).await;
        }
        count
    }

    async fn refresh_requested(&self) {
        self.requested.notified().await;
    }
}
