//! Collaborator seams with mockall annotations for testing
//!
//! Every external system the lanes talk to sits behind one of these traits:
//! place discovery, web search, post scraping and AI extraction. The real
//! HTTP bindings live in `services`; tests substitute mocks or fakes.

use async_trait::async_trait;
use serde_json::Value;
use shared::{BusinessCandidate, MergedRecord, PipelineConfig};

use crate::error::OrchestratorResult;

/// One organic search hit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchItem {
    pub url: String,
    pub title: Option<String>,
}

/// Search collaborator reply
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    pub success: bool,
    pub items: Vec<SearchItem>,
}

/// Scrape collaborator reply; `content` is the raw post record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrapeResponse {
    pub success: bool,
    pub content: Value,
}

/// Two-part message sent to the AI extraction collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub system_prompt: String,
    /// JSON `[{"<business>": {"<url>": "<caption>"}}]`
    pub payload: String,
}

/// A structured tool call returned by the AI extraction collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub name: String,
    /// Raw JSON arguments as produced by the model
    pub arguments: String,
}

/// Discovers businesses around a point
#[mockall::automock]
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Ordered list of nearby businesses
    async fn discover(&self, lat: f64, lng: f64) -> OrchestratorResult<Vec<BusinessCandidate>>;
}

/// Web search for promotional mentions
#[mockall::automock]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> OrchestratorResult<SearchResponse>;
}

/// Fetches the content behind one social post URL
#[mockall::automock]
#[async_trait]
pub trait ScrapeProvider: Send + Sync {
    async fn scrape(&self, url: &str) -> OrchestratorResult<ScrapeResponse>;
}

/// Turns captions into structured deal tool calls
#[mockall::automock]
#[async_trait]
pub trait DealExtractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> OrchestratorResult<Vec<ToolInvocation>>;
}

/// End-to-end lookup consumed by the HTTP front end
#[mockall::automock]
#[async_trait]
pub trait DealLookup: Send + Sync {
    /// Merged records in candidate order
    async fn lookup(&self, lat: f64, lng: f64) -> OrchestratorResult<Vec<MergedRecord>>;

    /// Active pipeline settings
    fn settings(&self) -> PipelineConfig;
}
