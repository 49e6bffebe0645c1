use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid upstream server: {0}")]
    InvalidUpstream(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport timeout: {server}")]
    TransportTimeout { server: String },

    #[error("Upstream {server} answered {rcode}")]
    UpstreamStatus { server: String, rcode: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("IP set error: {0}")]
    IpSet(String),

    #[error("Blocklist source error: {0}")]
    BlocklistSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}
