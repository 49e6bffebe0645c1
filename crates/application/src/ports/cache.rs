use dnsbox_domain::CacheStats;

pub trait CacheStatsPort: Send + Sync {
    fn stats(&self) -> CacheStats;
}
