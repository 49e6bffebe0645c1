use async_trait::async_trait;
use dnsbox_domain::BlocklistStatus;
use std::time::Duration;

/// Periodically refreshed blocklist.
///
/// `is_blocked` sits on the query hot path and reads an atomically swapped
/// snapshot; a refresh never blocks it.
#[async_trait]
pub trait BlocklistPort: Send + Sync {
    fn is_blocked(&self, name: &str) -> bool;

    /// Asks the refresh loop for an immediate refresh. Requests made while
    /// one is already pending are coalesced.
    fn force_refresh(&self);

    fn status(&self) -> BlocklistStatus;

    /// Replaces the sources used by the next refresh.
    fn update_sources(&self, sources: Vec<String>);

    fn refresh_interval(&self) -> Duration;

    /// Rebuilds the set from every source and publishes it. Returns the
    /// number of loaded entries.
    async fn refresh(&self) -> usize;

    /// Resolves when a forced refresh has been requested.
    async fn refresh_requested(&self);
}
