//! Configuration module for dnsbox
//!
//! - `root`: Main configuration, loading and CLI overrides
//! - `server`: DNS listen addresses and the management API address
//! - `dns`: Upstream resolvers and query timeout
//! - `ipset`: Kernel IP set names
//! - `rules`: Static policy rules (domains and suffixes)
//! - `blocklist`: Blocklist sources and refresh period
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod blocklist;
pub mod dns;
pub mod errors;
pub mod ipset;
pub mod logging;
pub mod root;
pub mod rules;
pub mod server;

pub use blocklist::BlocklistConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use ipset::IpSetConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use rules::RulesConfig;
pub use server::ServerConfig;
