use crate::BlocklistRefreshJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// let handles = JobRunner::new()
///     .with_blocklist_refresh(BlocklistRefreshJob::new(blocklist).with_cancellation(token))
///     .start();
/// ```
pub struct JobRunner {
    blocklist_refresh: Option<BlocklistRefreshJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            blocklist_refresh: None,
        }
    }

    pub fn with_blocklist_refresh(mut self, job: BlocklistRefreshJob) -> Self {
        self.blocklist_refresh = Some(job);
        self
    }

    /// Start all registered background jobs. The returned handles finish once
    /// each job has observed its cancellation token.
    pub fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");
        let mut handles = Vec::new();

        if let Some(job) = self.blocklist_refresh {
            handles.push(Arc::new(job).start());
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
