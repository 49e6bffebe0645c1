use dnsbox_application::use_cases::{
    AddRulesUseCase, ForceBlocklistRefreshUseCase, GetBlocklistStatusUseCase,
    GetCacheStatsUseCase, GetRulesUseCase, RemoveRulesUseCase, UpdateBlocklistSourcesUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_rules: Arc<GetRulesUseCase>,
    pub add_rules: Arc<AddRulesUseCase>,
    pub remove_rules: Arc<RemoveRulesUseCase>,
    pub get_blocklist_status: Arc<GetBlocklistStatusUseCase>,
    pub force_blocklist_refresh: Arc<ForceBlocklistRefreshUseCase>,
    pub update_blocklist_sources: Arc<UpdateBlocklistSourcesUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
}
