use dnsbox_domain::{CliOverrides, Config};
use std::path::Path;

/// Loads and validates the configuration. Any error here is fatal.
pub fn load_config(config_path: &Path, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
