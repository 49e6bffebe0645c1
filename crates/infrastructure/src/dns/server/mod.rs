pub mod handler;
pub mod listener;

pub use handler::{DnsQueryHandler, SINKHOLE_TTL};
pub use listener::DnsListener;
