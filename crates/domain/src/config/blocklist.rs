use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_REFRESH_HOURS: i64 = 24;
const MAX_REFRESH_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlocklistConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Hosts-format sources: `http(s)://` URLs or local file paths.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Refresh period in hours; zero or negative means 24, capped at a year.
    #[serde(default = "default_refresh_hours")]
    pub refresh_hours: i64,
}

impl BlocklistConfig {
    pub fn refresh_interval(&self) -> Duration {
        let hours = if self.refresh_hours <= 0 {
            DEFAULT_REFRESH_HOURS
        } else {
            self.refresh_hours.min(MAX_REFRESH_HOURS)
        };
        Duration::from_secs(hours as u64 * 3600)
    }
}

fn default_refresh_hours() -> i64 {
    DEFAULT_REFRESH_HOURS
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            urls: vec![],
            refresh_hours: default_refresh_hours(),
        }
    }
}
