pub mod query;
pub mod resolver;

pub use query::{query_server, QueryAttemptResult};
pub use resolver::UpstreamResolver;
