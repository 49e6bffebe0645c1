use crate::ports::{BlocklistPort, ConfigStore};
use dnsbox_domain::MutableSections;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct UpdateBlocklistSourcesUseCase {
    blocklist: Option<Arc<dyn BlocklistPort>>,
    sections: Arc<MutableSections>,
    store: Arc<dyn ConfigStore>,
}

impl UpdateBlocklistSourcesUseCase {
    pub fn new(
        blocklist: Option<Arc<dyn BlocklistPort>>,
        sections: Arc<MutableSections>,
        store: Arc<dyn ConfigStore>,
    ) -> Self {
        Self {
            blocklist,
            sections,
            store,
        }
    }

    /// Replaces the source list and schedules a refresh. Persisting is best
    /// effort: a failed save is logged and the live change is kept.
    #[instrument(skip(self, sources), fields(count = sources.len()))]
    pub async fn execute(&self, sources: Vec<String>) {
        let sources: Vec<String> = sources
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        self.sections.set_blocklist_urls(sources.clone());
        if let Some(blocklist) = &self.blocklist {
            blocklist.update_sources(sources);
            blocklist.force_refresh();
        }

        if let Err(e) = self.store.save(&self.sections).await {
            warn!(error = %e, "Failed to persist blocklist sources");
        }
        info!("Blocklist sources updated");
    }
}
