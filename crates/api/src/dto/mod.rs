pub mod blocklist;
pub mod cache;

pub use blocklist::BlocklistStatusResponse;
pub use cache::CacheStatsResponse;
