use dnsbox_application::ports::BlocklistPort;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Keeps the blocklist fresh: one refresh at start, then on every interval
/// tick or forced request until cancelled.
pub struct BlocklistRefreshJob {
    blocklist: Arc<dyn BlocklistPort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl BlocklistRefreshJob {
    pub fn new(blocklist: Arc<dyn BlocklistPort>) -> Self {
        let interval = blocklist.refresh_interval();
        Self {
            blocklist,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting blocklist refresh job"
        );

        tokio::spawn(async move {
            let Some(domain_count) = self.refresh_unless_cancelled().await else {
                info!("BlocklistRefreshJob: cancelled before initial refresh");
                return;
            };
            info!(domain_count, "BlocklistRefreshJob: initial refresh completed");

            let mut interval = tokio::time::interval(self.interval);
            interval.tick().await;

            loop {
                let forced = tokio::select! {
                    _ = self.shutdown.cancelled() => break,
                    _ = interval.tick() => false,
                    _ = self.blocklist.refresh_requested() => true,
                };

                let Some(domain_count) = self.refresh_unless_cancelled().await else {
                    break;
                };
                if forced {
                    interval.reset();
                    info!(domain_count, "BlocklistRefreshJob: forced refresh completed");
                } else {
                    info!(domain_count, "BlocklistRefreshJob: scheduled refresh completed");
                }
            }

            info!("BlocklistRefreshJob: shutting down");
        })
    }

    /// Runs one refresh, abandoning it if shutdown is requested meanwhile.
    async fn refresh_unless_cancelled(&self) -> Option<usize> {
        tokio::select! {
            _ = self.shutdown.cancelled() => None,
            domain_count = self.blocklist.refresh() => Some(domain_count),
        }
    }
}
