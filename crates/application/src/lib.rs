//! dnsbox application layer: ports implemented by infrastructure and the
//! use cases driven by the management API.
pub mod ports;
pub mod use_cases;
