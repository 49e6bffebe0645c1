#![allow(dead_code)]
pub mod dns_server_mock;
pub mod http_mock;
pub mod ip_set;

pub use dns_server_mock::{MockDnsServer, MockDohServer, MockReply, MockTcpDnsServer};
pub use http_mock::MockHttpServer;
pub use ip_set::RecordingIpSet;

use hickory_proto::rr::Name;
use std::str::FromStr;

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}
