//! Service implementations
//!
//! Real HTTP bindings for every collaborator trait, plus credential loading.
//! These are the production implementations that handle actual I/O.

pub mod brightdata;
pub mod credentials;
pub mod http;
pub mod letta;
pub mod places;

#[cfg(test)]
mod tests;

pub use brightdata::{BrightDataScraper, BrightDataSearch};
pub use credentials::Credentials;
pub use letta::LettaExtractor;
pub use places::GooglePlacesSource;

use shared::{process_info, process_warn, PipelineConfig, ProcessId};

use crate::error::OrchestratorResult;
use crate::orchestrator::DealOrchestrator;

/// Orchestrator wired to the production collaborators
pub type LiveOrchestrator = DealOrchestrator<GooglePlacesSource, BrightDataSearch, BrightDataScraper, LettaExtractor>;

/// Build the production orchestrator over one shared HTTP client.
///
/// An unreachable Letta agent is logged but not fatal; lanes report it per
/// business when it stays down.
pub async fn live_orchestrator(credentials: Credentials, config: PipelineConfig) -> OrchestratorResult<LiveOrchestrator> {
    let client = http::build_client(config.lane_timeout)?;

    let places = GooglePlacesSource::new(client.clone(), credentials.places_api_key);
    let search = BrightDataSearch::new(client.clone(), credentials.brightdata_token.clone(), credentials.serp_zone);
    let scraper = BrightDataScraper::new(client.clone(), credentials.brightdata_token);
    let extractor = LettaExtractor::new(client, credentials.letta_token, credentials.letta_agent_id);

    match extractor.verify_agent().await {
        Ok(()) => {
            process_info!(ProcessId::current(), agent_id = %extractor.agent_id(), "✅ Connected to Letta agent");
        }
        Err(e) => {
            process_warn!(ProcessId::current(), error = %e, "⚠️ Letta agent check failed, continuing");
        }
    }

    DealOrchestrator::new(places, search, scraper, extractor, config)
}
