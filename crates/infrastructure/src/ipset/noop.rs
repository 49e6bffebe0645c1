use async_trait::async_trait;
use dnsbox_application::ports::IpSetPort;
use dnsbox_domain::DomainError;
use std::net::IpAddr;

/// Used when no IP set is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIpSet;

#[async_trait]
impl IpSetPort for NoopIpSet {
    async fn create_ipv4_set(&self, _name: &str, _default_timeout: u32) -> Result<(), DomainError> {
        Ok(())
    }

    async fn create_ipv6_set(&self, _name: &str, _default_timeout: u32) -> Result<(), DomainError> {
        Ok(())
    }

    async fn add_element(&self, _set: &str, _ip: IpAddr, _timeout: u32) -> Result<(), DomainError> {
        Ok(())
    }
}
