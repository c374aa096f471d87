//! Main orchestrator implementation
//!
//! Fans one lane per business out over a bounded worker pool, waits for every
//! lane to reach a terminal state and merges the outcomes onto the candidate
//! list. Each call builds its own task group and pool, so nothing is carried
//! from one request to the next.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

use shared::{
    process_debug, process_error, process_info, process_warn, BusinessCandidate, ErrorKind, MergedRecord,
    PipelineConfig, ProcessId, UnitOutcome,
};

use crate::{
    core::{merge_outcomes, unique_by_key, OrchestrationResult, OutcomeSlots},
    error::{OrchestratorError, OrchestratorResult},
    pipeline::LanePipeline,
    traits::{CandidateSource, DealExtractor, DealLookup, ScrapeProvider, SearchProvider},
};

/// Coordinates candidate discovery, the per-business lanes and the final merge
pub struct DealOrchestrator<C, S, P, E>
where
    C: CandidateSource + 'static,
    S: SearchProvider + 'static,
    P: ScrapeProvider + 'static,
    E: DealExtractor + 'static,
{
    candidates: C,
    pipeline: LanePipeline<S, P, E>,
    config: PipelineConfig,
}

impl<C, S, P, E> DealOrchestrator<C, S, P, E>
where
    C: CandidateSource + 'static,
    S: SearchProvider + 'static,
    P: ScrapeProvider + 'static,
    E: DealExtractor + 'static,
{
    /// Create new orchestrator with injected collaborators
    pub fn new(candidates: C, search: S, scraper: P, extractor: E, config: PipelineConfig) -> OrchestratorResult<Self> {
        let pipeline = LanePipeline::new(search, scraper, extractor, &config)?;
        Ok(Self {
            candidates,
            pipeline,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Discover businesses around a point, run their lanes and merge.
    ///
    /// Fails only when the candidate source fails; per-business problems show
    /// up as empty deal lists.
    pub async fn aggregate(&self, lat: f64, lng: f64) -> OrchestratorResult<Vec<MergedRecord>> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("lookup", %request_id);

        async {
            let candidates = self.candidates.discover(lat, lng).await.map_err(|e| {
                process_error!(ProcessId::current(), error = %e, "❌ Candidate source failed");
                OrchestratorError::TotalFailure { message: e.to_string() }
            })?;

            if candidates.is_empty() {
                process_info!(ProcessId::current(), lat, lng, "No businesses found nearby");
                return Ok(Vec::new());
            }

            let dispatched = unique_by_key(&candidates);
            if dispatched.len() < candidates.len() {
                process_warn!(
                    ProcessId::current(),
                    repeated = candidates.len() - dispatched.len(),
                    "Repeated business names share one lane"
                );
            }

            let result = self.dispatch(&dispatched).await;
            Ok(merge_outcomes(&candidates, &result))
        }
        .instrument(span)
        .await
    }

    /// Run one lane per business and block until all of them have settled.
    ///
    /// At most `max_lanes` lanes run at once (never more than there are
    /// businesses); the rest queue for a free slot.
    /// The returned result holds exactly one outcome per business, in the
    /// order given.
    pub async fn dispatch(&self, businesses: &[BusinessCandidate]) -> OrchestrationResult {
        let started = Instant::now();
        // Never more permits than lanes, which also keeps large limits under the semaphore cap
        let pool_size = self.config.max_lanes.min(businesses.len());
        let pool = Arc::new(Semaphore::new(pool_size));
        let mut lanes = JoinSet::new();

        process_info!(
            ProcessId::current(),
            units = businesses.len(),
            max_lanes = self.config.max_lanes,
            pool_size,
            "🚀 Dispatching lanes"
        );

        for (index, business) in businesses.iter().cloned().enumerate() {
            let pipeline = self.pipeline.clone();
            let pool = Arc::clone(&pool);
            let deadline = self.config.lane_timeout;
            lanes.spawn(
                async move { (index, run_lane(pipeline, pool, business, deadline).await) }.in_current_span(),
            );
        }

        let mut slots = OutcomeSlots::new(businesses.len());
        while let Some(joined) = lanes.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    if !slots.fill(index, outcome) {
                        process_warn!(ProcessId::current(), index, "Lane reported twice, keeping first outcome");
                    }
                }
                // Lanes catch their own panics; this is a cancelled task
                Err(e) => {
                    process_error!(ProcessId::current(), error = %e, "❌ Lane task did not complete");
                }
            }
        }

        let result = slots.finish(businesses);
        process_info!(
            ProcessId::current(),
            succeeded = result.succeeded(),
            failed = result.failed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✅ All lanes settled"
        );
        result
    }
}

/// Wait for a pool slot, then run the pipeline under the lane deadline.
/// Never panics and never returns an error: every ending becomes an outcome.
async fn run_lane<S, P, E>(
    pipeline: LanePipeline<S, P, E>,
    pool: Arc<Semaphore>,
    business: BusinessCandidate,
    deadline: Duration,
) -> UnitOutcome
where
    S: SearchProvider + 'static,
    P: ScrapeProvider + 'static,
    E: DealExtractor + 'static,
{
    let _permit = match pool.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            return UnitOutcome::failed(business, ErrorKind::LaneAborted("worker pool closed".to_string()), 0);
        }
    };

    process_debug!(ProcessId::current(), business = %business.name, "Lane running");
    let started = Instant::now();

    let work = AssertUnwindSafe(pipeline.run(&business)).catch_unwind();
    let settled = tokio::time::timeout(deadline, work).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let outcome = match settled {
        Ok(Ok(Ok(result))) => UnitOutcome::succeeded(business, result, elapsed_ms),
        Ok(Ok(Err(e))) => UnitOutcome::failed(business, e.to_error_kind(), elapsed_ms),
        Ok(Err(panic)) => UnitOutcome::failed(business, ErrorKind::LaneAborted(panic_message(panic)), elapsed_ms),
        Err(_) => UnitOutcome::failed(business, ErrorKind::Timeout, elapsed_ms),
    };

    match &outcome.error {
        None => {
            process_info!(
                ProcessId::current(),
                business = %outcome.business_key,
                deals = outcome.deals().len(),
                elapsed_ms,
                "Lane succeeded"
            );
        }
        Some(kind) => {
            process_warn!(
                ProcessId::current(),
                business = %outcome.business_key,
                error = %kind,
                elapsed_ms,
                "Lane failed"
            );
        }
    }
    outcome
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "lane panicked".to_string()
    }
}

#[async_trait]
impl<C, S, P, E> DealLookup for DealOrchestrator<C, S, P, E>
where
    C: CandidateSource + 'static,
    S: SearchProvider + 'static,
    P: ScrapeProvider + 'static,
    E: DealExtractor + 'static,
{
    async fn lookup(&self, lat: f64, lng: f64) -> OrchestratorResult<Vec<MergedRecord>> {
        self.aggregate(lat, lng).await
    }

    fn settings(&self) -> PipelineConfig {
        self.config.clone()
    }
}
