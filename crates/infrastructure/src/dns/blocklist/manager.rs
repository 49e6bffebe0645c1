use super::parser::parse_hosts_text;
use super::source::fetch_source;
use crate::dns::policy::PolicySet;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dnsbox_application::ports::BlocklistPort;
use dnsbox_domain::BlocklistStatus;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One published blocklist generation. Never mutated after publication.
#[derive(Debug, Default)]
pub struct BlocklistState {
    pub set: PolicySet,
    pub domain_count: usize,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Holds the current blocklist and rebuilds it from its sources.
///
/// Readers load the current [`BlocklistState`] through `ArcSwap` and never
/// wait on a refresh. A refresh builds a complete new set off to the side
/// and publishes it with a single store.
pub struct BlocklistManager {
    state: ArcSwap<BlocklistState>,
    sources: RwLock<Vec<String>>,
    client: reqwest::Client,
    refresh_interval: Duration,
    refresh_tx: mpsc::Sender<()>,
    refresh_rx: Mutex<mpsc::Receiver<()>>,
}

impl BlocklistManager {
    pub fn new(sources: Vec<String>, refresh_interval: Duration) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        // Single slot: one pending forced refresh absorbs any further requests.
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        Self {
            state: ArcSwap::from_pointee(BlocklistState::default()),
            sources: RwLock::new(sources),
            client,
            refresh_interval,
            refresh_tx,
            refresh_rx: Mutex::new(refresh_rx),
        }
    }

    /// Current generation, for callers that need several reads to agree.
    pub fn current(&self) -> Arc<BlocklistState> {
        self.state.load_full()
    }

    fn sources(&self) -> Vec<String> {
        match self.sources.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn build_state(&self, sources: &[String]) -> BlocklistState {
        let mut set = PolicySet::new();
        let mut domain_count = 0;

        for source in sources {
            match fetch_source(source, &self.client).await {
                Ok(text) => {
                    let before = domain_count;
                    for host in parse_hosts_text(&text) {
                        set.add_domain(host);
                        domain_count += 1;
                    }
                    debug!(
                        source = %source,
                        entries = domain_count - before,
                        "Blocklist source loaded"
                    );
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "Skipping blocklist source");
                }
            }
        }

        BlocklistState {
            set,
            domain_count,
            last_refreshed_at: Some(Utc::now()),
        }
    }
}

#[async_trait]
impl BlocklistPort for BlocklistManager {
    fn is_blocked(&self, name: &str) -> bool {
        self.state.load().set.matches_hierarchy(name)
    }

    fn force_refresh(&self) {
        match self.refresh_tx.try_send(()) {
            Ok(()) => debug!("Blocklist refresh queued"),
            Err(TrySendError::Full(())) => debug!("Blocklist refresh already pending"),
            Err(TrySendError::Closed(())) => warn!("Blocklist refresh channel closed"),
        }
    }

    fn status(&self) -> BlocklistStatus {
        let state = self.state.load();
        BlocklistStatus {
            last_refreshed_at: state.last_refreshed_at,
            domain_count: state.domain_count,
            sources: self.sources(),
        }
    }

    fn update_sources(&self, sources: Vec<String>) {
        match self.sources.write() {
            Ok(mut guard) => *guard = sources,
            Err(poisoned) => *poisoned.into_inner() = sources,
        }
    }

    fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    async fn refresh(&self) -> usize {
        let sources = self.sources();
        info!(sources = sources.len(), "Refreshing blocklist");

        let state = self.build_state(&sources).await;
        let domain_count = state.domain_count;
        let unique = state.set.len();
        self.state.store(Arc::new(state));

        info!(domain_count, unique, "Blocklist refreshed");
        domain_count
    }

    async fn refresh_requested(&self) {
        let mut rx = self.refresh_rx.lock().await;
        if rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}
