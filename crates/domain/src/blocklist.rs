use chrono::{DateTime, Utc};

/// Point-in-time view of the blocklist manager.
#[derive(Debug, Clone, Default)]
pub struct BlocklistStatus {
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub domain_count: usize,
    pub sources: Vec<String>,
}
