pub mod blocklist;
pub mod cache;
pub mod config;
pub mod rules;

pub use blocklist::{
    ForceBlocklistRefreshUseCase, GetBlocklistStatusUseCase, UpdateBlocklistSourcesUseCase,
};
pub use cache::GetCacheStatsUseCase;
pub use config::PersistConfigUseCase;
pub use rules::{AddRulesUseCase, GetRulesUseCase, RemoveRulesUseCase, RuleChangeReport};
