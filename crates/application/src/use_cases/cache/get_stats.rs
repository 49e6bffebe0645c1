use crate::ports::CacheStatsPort;
use dnsbox_domain::CacheStats;
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    cache: Arc<dyn CacheStatsPort>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<dyn CacheStatsPort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheStats {
        self.cache.stats()
    }
}
