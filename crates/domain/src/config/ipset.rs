use serde::{Deserialize, Serialize};

/// Kernel IP sets fed with resolved addresses of policy-matched names.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IpSetConfig {
    pub ipv4_name: Option<String>,

    pub ipv6_name: Option<String>,

    /// Timeout given to the sets at creation (default: 7200)
    #[serde(default = "default_set_timeout_secs")]
    pub default_timeout_secs: u32,
}

impl IpSetConfig {
    /// Configured IPv4 set; an empty name disables it.
    pub fn ipv4_set(&self) -> Option<&str> {
        non_empty(&self.ipv4_name)
    }

    /// Configured IPv6 set; an empty name disables it.
    pub fn ipv6_set(&self) -> Option<&str> {
        non_empty(&self.ipv6_name)
    }

    pub fn is_enabled(&self) -> bool {
        self.ipv4_set().is_some() || self.ipv6_set().is_some()
    }
}

fn non_empty(name: &Option<String>) -> Option<&str> {
    name.as_deref().map(str::trim).filter(|n| !n.is_empty())
}

fn default_set_timeout_secs() -> u32 {
    7200
}

impl Default for IpSetConfig {
    fn default() -> Self {
        Self {
            ipv4_name: None,
            ipv6_name: None,
            default_timeout_secs: default_set_timeout_secs(),
        }
    }
}
