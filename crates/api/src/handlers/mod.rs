pub mod blocklist;
pub mod cache;
pub mod health;
pub mod rules;

pub use blocklist::{get_blocklist, refresh_blocklist, update_blocklist_sources};
pub use cache::get_cache_stats;
pub use health::health_check;
pub use rules::{
    add_domains, add_suffixes, get_domains, get_suffixes, remove_domains, remove_suffixes,
};
