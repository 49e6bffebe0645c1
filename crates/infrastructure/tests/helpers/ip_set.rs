#![allow(dead_code)]
use async_trait::async_trait;
use dnsbox_application::ports::IpSetPort;
use dnsbox_domain::DomainError;
use std::net::IpAddr;
use std::sync::Mutex;

/// Records every IP-set call; optionally fails `add_element`.
#[derive(Default)]
pub struct RecordingIpSet {
    created: Mutex<Vec<(String, u32)>>,
    added: Mutex<Vec<(String, IpAddr, u32)>>,
    fail_adds: bool,
}

impl RecordingIpSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_adds: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<(String, u32)> {
        self.created.lock().unwrap().clone()
    }

    pub fn added(&self) -> Vec<(String, IpAddr, u32)> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl IpSetPort for RecordingIpSet {
    async fn create_ipv4_set(&self, name: &str, default_timeout: u32) -> Result<(), DomainError> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), default_timeout));
        Ok(())
    }

    async fn create_ipv6_set(&self, name: &str, default_timeout: u32) -> Result<(), DomainError> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), default_timeout));
        Ok(())
    }

    async fn add_element(&self, set: &str, ip: IpAddr, timeout: u32) -> Result<(), DomainError> {
        self.added
            .lock()
            .unwrap()
            .push((set.to_string(), ip, timeout));
        if self.fail_adds {
            return Err(DomainError::IpSet(format!("cannot add {} to {}", ip, set)));
        }
        Ok(())
    }
}
