pub mod blocklist;
pub mod cache;
pub mod forwarding;
pub mod policy;
pub mod server;
pub mod transport;
pub mod upstream;

pub use blocklist::BlocklistManager;
pub use cache::ResponseCache;
pub use policy::{PolicySet, SharedPolicySet};
pub use server::{DnsListener, DnsQueryHandler};
pub use upstream::UpstreamResolver;
