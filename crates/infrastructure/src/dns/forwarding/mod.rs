pub mod message_builder;
pub mod response_parser;

pub use message_builder::MessageBuilder;
pub use response_parser::{DnsResponse, ResponseParser};
