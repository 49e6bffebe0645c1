use dnsbox_application::ports::{BlocklistPort, IpSetPort};
use dnsbox_domain::{Config, MutableSections};
use dnsbox_infrastructure::config::TomlConfigStore;
use dnsbox_infrastructure::dns::{
    BlocklistManager, DnsQueryHandler, PolicySet, ResponseCache, SharedPolicySet, UpstreamResolver,
};
use dnsbox_infrastructure::ipset::{IpsetCommand, NoopIpSet};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Long-lived DNS-side components shared by the listeners, the jobs and the
/// management API.
pub struct DnsServices {
    pub cache: Arc<ResponseCache>,
    pub policy: Arc<SharedPolicySet>,
    pub sections: Arc<MutableSections>,
    pub blocklist: Option<Arc<BlocklistManager>>,
    pub ip_set: Arc<dyn IpSetPort>,
    pub config_store: Arc<TomlConfigStore>,
    pub handler: DnsQueryHandler,
}

impl DnsServices {
    pub fn new(config: &Config, config_path: &Path) -> Self {
        let sections = Arc::new(MutableSections::from_config(config));
        let snapshot = sections.snapshot();
        let policy = Arc::new(SharedPolicySet::new(PolicySet::from_rules(
            &snapshot.domains,
            &snapshot.suffixes,
        )));
        info!(rules = policy.len(), "Policy set loaded");

        let cache = Arc::new(ResponseCache::new());
        let upstream = Arc::new(UpstreamResolver::new(
            config.dns.upstream_servers.clone(),
            config.dns.query_timeout(),
        ));

        let ip_set: Arc<dyn IpSetPort> = if config.ipset.is_enabled() {
            Arc::new(IpsetCommand::new())
        } else {
            Arc::new(NoopIpSet)
        };

        let blocklist = config.blocklist.enabled.then(|| {
            Arc::new(BlocklistManager::new(
                snapshot.blocklist_urls.clone(),
                config.blocklist.refresh_interval(),
            ))
        });

        let mut handler =
            DnsQueryHandler::new(cache.clone(), policy.clone(), upstream, ip_set.clone())
                .with_ip_sets(
                    config.ipset.ipv4_set().map(str::to_string),
                    config.ipset.ipv6_set().map(str::to_string),
                );
        if let Some(blocklist) = &blocklist {
            handler = handler.with_blocklist(blocklist.clone());
        }

        let config_store = Arc::new(TomlConfigStore::new(config_path, config.clone()));

        Self {
            cache,
            policy,
            sections,
            blocklist,
            ip_set,
            config_store,
            handler,
        }
    }

    pub fn blocklist_port(&self) -> Option<Arc<dyn BlocklistPort>> {
        self.blocklist
            .clone()
            .map(|blocklist| blocklist as Arc<dyn BlocklistPort>)
    }
}
