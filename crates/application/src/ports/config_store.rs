use async_trait::async_trait;
use dnsbox_domain::{DomainError, MutableSections};

/// Persists runtime-mutable sections back into the configuration file.
///
/// Saves are serialized and snapshot `sections` only once they hold the
/// store, so the last completed save always carries the newest state.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn save(&self, sections: &MutableSections) -> Result<(), DomainError>;
}
