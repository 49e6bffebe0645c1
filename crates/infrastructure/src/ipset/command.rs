use async_trait::async_trait;
use dnsbox_application::ports::IpSetPort;
use dnsbox_domain::DomainError;
use std::net::IpAddr;
use tokio::process::Command;
use tracing::debug;

const IPSET_BINARY: &str = "ipset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetFamily {
    Inet,
    Inet6,
}

/// Drives the `ipset` userspace tool. Every call is idempotent (`-exist`).
#[derive(Debug, Clone)]
pub struct IpsetCommand {
    binary: String,
}

impl IpsetCommand {
    pub fn new() -> Self {
        Self::with_binary(IPSET_BINARY)
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(&self, args: Vec<String>) -> Result<(), DomainError> {
        debug!(binary = %self.binary, args = ?args, "Running ipset");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| DomainError::IpSet(format!("failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(DomainError::IpSet(format!(
                "{} {} exited with {}: {}",
                self.binary,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

impl Default for IpsetCommand {
    fn default() -> Self {
        Self::new()
    }
}

fn create_args(name: &str, family: SetFamily, default_timeout: u32) -> Vec<String> {
    let mut args = vec!["create".to_string(), name.to_string(), "hash:ip".to_string()];
    if family == SetFamily::Inet6 {
        args.push("family".to_string());
        args.push("inet6".to_string());
    }
    args.push("timeout".to_string());
    args.push(default_timeout.to_string());
    args.push("-exist".to_string());
    args
}

fn add_args(set: &str, ip: IpAddr, timeout: u32) -> Vec<String> {
    vec![
        "add".to_string(),
        set.to_string(),
        ip.to_string(),
        "timeout".to_string(),
        timeout.to_string(),
        "-exist".to_string(),
    ]
}

#[async_trait]
impl IpSetPort for IpsetCommand {
    async fn create_ipv4_set(&self, name: &str, default_timeout: u32) -> Result<(), DomainError> {
        self.run(create_args(name, SetFamily::Inet, default_timeout))
            .await
    }

    async fn create_ipv6_set(&self, name: &str, default_timeout: u32) -> Result<(), DomainError> {
        self.run(create_args(name, SetFamily::Inet6, default_timeout))
            .await
    }

    async fn add_element(&self, set: &str, ip: IpAddr, timeout: u32) -> Result<(), DomainError> {
        self.run(add_args(set, ip, timeout)).await
    }
}
