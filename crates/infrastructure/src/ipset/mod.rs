//! Adapters for the kernel IP-set binding.
pub mod command;
pub mod noop;

pub use command::IpsetCommand;
pub use noop::NoopIpSet;
