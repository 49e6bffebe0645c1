//! # dnsbox
//!
//! Filtering DNS forwarder: sinkholes blocklisted names, caches answers and
//! feeds resolved addresses of selected domains into kernel IP sets.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use dnsbox_domain::CliOverrides;
use dnsbox_jobs::{BlocklistRefreshJob, JobRunner};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "dnsbox")]
#[command(version)]
#[command(about = "Filtering DNS forwarder with IP-set population")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "DNSBOX_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Overrides `[logging].level`
    #[arg(long)]
    log_level: Option<String>,

    /// Overrides `[server].listen`; repeat for several addresses
    #[arg(short, long)]
    listen: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            log_level: self.log_level.clone(),
            listen: (!self.listen.is_empty()).then(|| self.listen.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(&cli.config, cli.overrides())?;
    bootstrap::init_logging(&config);
    info!(
        config_file = %cli.config.display(),
        upstreams = config.dns.upstream_servers.len(),
        blocklist = config.blocklist.enabled,
        ipset = config.ipset.is_enabled(),
        "Configuration loaded"
    );

    let listen = config.listen_addrs()?;
    let api_addr = config.api_addr()?;

    let services = di::DnsServices::new(&config, &cli.config);
    bootstrap::init_ip_sets(services.ip_set.as_ref(), &config.ipset).await?;
    let use_cases = di::UseCases::new(&services);

    let shutdown = CancellationToken::new();

    let dns = server::start_dns_server(&listen, services.handler.clone(), shutdown.clone()).await?;

    let mut jobs = JobRunner::new();
    if let Some(blocklist) = services.blocklist_port() {
        jobs = jobs.with_blocklist_refresh(
            BlocklistRefreshJob::new(blocklist).with_cancellation(shutdown.clone()),
        );
    }
    let job_handles = jobs.start();

    let web = match api_addr {
        Some(addr) => {
            Some(server::start_web_server(addr, use_cases.app_state(), shutdown.clone()).await?)
        }
        None => {
            info!("Management API disabled");
            None
        }
    };

    info!("dnsbox ready");
    bootstrap::wait_for_shutdown_signal().await;

    info!("Shutting down");
    shutdown.cancel();

    dns.wait().await;
    for handle in job_handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Background job panicked");
        }
    }
    if let Some(web) = web {
        if let Err(e) = web.await {
            error!(error = %e, "Management API task panicked");
        }
    }

    match use_cases.persist_config.execute().await {
        Ok(()) => info!("Configuration saved"),
        Err(e) => error!(error = %e, "Failed to save configuration on shutdown"),
    }

    Ok(())
}
