use async_trait::async_trait;
use dnsbox_domain::DomainError;
use std::net::IpAddr;

/// Kernel IP-set binding.
#[async_trait]
pub trait IpSetPort: Send + Sync {
    async fn create_ipv4_set(&self, name: &str, default_timeout: u32) -> Result<(), DomainError>;

    async fn create_ipv6_set(&self, name: &str, default_timeout: u32) -> Result<(), DomainError>;

    async fn add_element(&self, set: &str, ip: IpAddr, timeout: u32) -> Result<(), DomainError>;
}
