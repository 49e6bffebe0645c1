use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream resolvers. Tried by transport priority: DoH, DoT, TCP, then UDP.
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Timeout applied to each upstream attempt (default: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DnsConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_upstream_servers() -> Vec<String> {
    vec!["1.1.1.1:53".to_string(), "8.8.8.8:53".to_string()]
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
