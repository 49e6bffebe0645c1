use crate::ports::ConfigStore;
use dnsbox_domain::{DomainError, MutableSections};
use std::sync::Arc;
use tracing::info;

/// Writes the current rule lists and blocklist sources to the config file.
pub struct PersistConfigUseCase {
    sections: Arc<MutableSections>,
    store: Arc<dyn ConfigStore>,
}

impl PersistConfigUseCase {
    pub fn new(sections: Arc<MutableSections>, store: Arc<dyn ConfigStore>) -> Self {
        Self { sections, store }
    }

    pub async fn execute(&self) -> Result<(), DomainError> {
        self.store.save(&self.sections).await?;
        let snapshot = self.sections.snapshot();
        info!(
            domains = snapshot.domains.len(),
            suffixes = snapshot.suffixes.len(),
            blocklist_sources = snapshot.blocklist_urls.len(),
            "Configuration saved"
        );
        Ok(())
    }
}
