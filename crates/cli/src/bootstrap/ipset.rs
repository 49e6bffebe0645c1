use dnsbox_application::ports::IpSetPort;
use dnsbox_domain::config::IpSetConfig;
use tracing::info;

/// Creates the configured sets. A failure aborts startup.
pub async fn init_ip_sets(ip_set: &dyn IpSetPort, config: &IpSetConfig) -> anyhow::Result<()> {
    if let Some(name) = config.ipv4_set() {
        ip_set
            .create_ipv4_set(name, config.default_timeout_secs)
            .await?;
        info!(set = %name, family = "inet", "IP set ready");
    }

    if let Some(name) = config.ipv6_set() {
        ip_set
            .create_ipv6_set(name, config.default_timeout_secs)
            .await?;
        info!(set = %name, family = "inet6", "IP set ready");
    }

    Ok(())
}
