use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// DNS listen addresses, each served over UDP and TCP.
    #[serde(default = "default_listen")]
    pub listen: Vec<String>,

    /// Management API address. The API is disabled when unset.
    #[serde(default = "default_api_listen")]
    pub api_listen: Option<String>,
}

fn default_listen() -> Vec<String> {
    vec!["0.0.0.0:53".to_string()]
}

fn default_api_listen() -> Option<String> {
    Some("127.0.0.1:8090".to_string())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            api_listen: default_api_listen(),
        }
    }
}
