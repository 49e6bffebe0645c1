//! dnsbox domain layer
pub mod blocklist;
pub mod cache;
pub mod config;
pub mod errors;
pub mod name;
pub mod rules;
pub mod upstream;

pub use blocklist::BlocklistStatus;
pub use cache::CacheStats;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use name::{normalize_name, normalize_suffix};
pub use rules::{MutableSections, MutableSnapshot, RuleKind};
pub use upstream::{scheme_priority, sort_by_priority, UpstreamScheme, UpstreamServer};
