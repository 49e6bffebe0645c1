use super::{
    BlocklistConfig, ConfigError, DnsConfig, IpSetConfig, LoggingConfig, RulesConfig,
    ServerConfig,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub ipset: IpSetConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub blocklist: BlocklistConfig,
}

/// Values given on the command line that win over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub listen: Option<Vec<String>>,
}

impl Config {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addrs()?;
        self.api_addr()?;

        if self.dns.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "dns.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.dns.upstream_servers.is_empty() {
            return Err(ConfigError::Validation(
                "dns.upstream_servers must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn listen_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        if self.server.listen.is_empty() {
            return Err(ConfigError::Validation(
                "server.listen must not be empty".to_string(),
            ));
        }

        self.server
            .listen
            .iter()
            .map(|addr| {
                addr.parse::<SocketAddr>().map_err(|e| {
                    ConfigError::Validation(format!("invalid listen address '{}': {}", addr, e))
                })
            })
            .collect()
    }

    pub fn api_addr(&self) -> Result<Option<SocketAddr>, ConfigError> {
        self.server
            .api_listen
            .as_deref()
            .map(|addr| {
                addr.parse::<SocketAddr>().map_err(|e| {
                    ConfigError::Validation(format!("invalid api_listen '{}': {}", addr, e))
                })
            })
            .transpose()
    }
}
