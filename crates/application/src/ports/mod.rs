pub mod blocklist;
pub mod cache;
pub mod config_store;
pub mod ip_set;
pub mod policy;

pub use blocklist::BlocklistPort;
pub use cache::CacheStatsPort;
pub use config_store::ConfigStore;
pub use ip_set::IpSetPort;
pub use policy::PolicyPort;
