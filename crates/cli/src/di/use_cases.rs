use super::DnsServices;
use dnsbox_api::AppState;
use dnsbox_application::use_cases::{
    AddRulesUseCase, ForceBlocklistRefreshUseCase, GetBlocklistStatusUseCase,
    GetCacheStatsUseCase, GetRulesUseCase, PersistConfigUseCase, RemoveRulesUseCase,
    UpdateBlocklistSourcesUseCase,
};
use std::sync::Arc;

pub struct UseCases {
    pub get_rules: Arc<GetRulesUseCase>,
    pub add_rules: Arc<AddRulesUseCase>,
    pub remove_rules: Arc<RemoveRulesUseCase>,
    pub get_blocklist_status: Arc<GetBlocklistStatusUseCase>,
    pub force_blocklist_refresh: Arc<ForceBlocklistRefreshUseCase>,
    pub update_blocklist_sources: Arc<UpdateBlocklistSourcesUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
    pub persist_config: Arc<PersistConfigUseCase>,
}

impl UseCases {
    pub fn new(services: &DnsServices) -> Self {
        let blocklist = services.blocklist_port();

        Self {
            get_rules: Arc::new(GetRulesUseCase::new(services.sections.clone())),
            add_rules: Arc::new(AddRulesUseCase::new(
                services.policy.clone(),
                services.sections.clone(),
                services.config_store.clone(),
            )),
            remove_rules: Arc::new(RemoveRulesUseCase::new(
                services.policy.clone(),
                services.sections.clone(),
                services.config_store.clone(),
            )),
            get_blocklist_status: Arc::new(GetBlocklistStatusUseCase::new(blocklist.clone())),
            force_blocklist_refresh: Arc::new(ForceBlocklistRefreshUseCase::new(blocklist.clone())),
            update_blocklist_sources: Arc::new(UpdateBlocklistSourcesUseCase::new(
                blocklist,
                services.sections.clone(),
                services.config_store.clone(),
            )),
            get_cache_stats: Arc::new(GetCacheStatsUseCase::new(services.cache.clone())),
            persist_config: Arc::new(PersistConfigUseCase::new(
                services.sections.clone(),
                services.config_store.clone(),
            )),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            get_rules: self.get_rules.clone(),
            add_rules: self.add_rules.clone(),
            remove_rules: self.remove_rules.clone(),
            get_blocklist_status: self.get_blocklist_status.clone(),
            force_blocklist_refresh: self.force_blocklist_refresh.clone(),
            update_blocklist_sources: self.update_blocklist_sources.clone(),
            get_cache_stats: self.get_cache_stats.clone(),
        }
    }
}
