//! State shared by the request handlers

use std::sync::Arc;
use std::time::Instant;

use orchestrator::DealLookup;

/// Handle to the deal lookup plus server bookkeeping. Cloned per request.
pub struct WebServerState<L> {
    pub lookup: Arc<L>,
    pub started_at: Instant,
}

impl<L: DealLookup> WebServerState<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup: Arc::new(lookup),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl<L> Clone for WebServerState<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            started_at: self.started_at,
        }
    }
}
