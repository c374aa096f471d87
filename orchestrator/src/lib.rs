//! Orchestrator library for concurrent deal lookups
//!
//! Given a point, the orchestrator asks a candidate source for nearby businesses,
//! runs one lane per business (search -> scrape -> AI extraction) on a bounded
//! worker pool, waits for every lane to settle and merges the outcomes back onto
//! the candidate list in its original order.

pub mod core;
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{merge_outcomes, OrchestrationResult};
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::DealOrchestrator;
pub use pipeline::LanePipeline;
pub use traits::{
    CandidateSource, DealExtractor, DealLookup, ExtractionRequest, ScrapeProvider, ScrapeResponse, SearchItem,
    SearchProvider, SearchResponse, ToolInvocation,
};
