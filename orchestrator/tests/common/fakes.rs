//! Async fakes for timing and failure scenarios

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::BusinessCandidate;

use orchestrator::{
    CandidateSource, DealExtractor, ExtractionRequest, OrchestratorError, OrchestratorResult, ScrapeProvider,
    ScrapeResponse, SearchItem, SearchProvider, SearchResponse, ToolInvocation,
};

/// Fixed candidate list, or a failing source
pub struct FakeCandidates {
    result: Result<Vec<BusinessCandidate>, String>,
}

impl FakeCandidates {
    pub fn with(candidates: Vec<BusinessCandidate>) -> Self {
        Self { result: Ok(candidates) }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl CandidateSource for FakeCandidates {
    async fn discover(&self, _lat: f64, _lng: f64) -> OrchestratorResult<Vec<BusinessCandidate>> {
        self.result
            .clone()
            .map_err(|message| OrchestratorError::unavailable("places", message))
    }
}

/// Tracks how many lanes are inside a collaborator at once
#[derive(Default)]
pub struct ConcurrencyProbe {
    current: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ConcurrencyProbe {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub enum SearchBehaviour {
    Hits(Vec<String>),
    Fail,
    /// Never answers
    Stall,
    Panic,
}

/// Search keyed by the business name at the start of the query
pub struct ScriptedSearch {
    behaviours: HashMap<String, SearchBehaviour>,
    delay: Duration,
    probe: Arc<ConcurrencyProbe>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self {
            behaviours: HashMap::new(),
            delay: Duration::ZERO,
            probe: Arc::new(ConcurrencyProbe::default()),
        }
    }

    pub fn on(mut self, business: &str, behaviour: SearchBehaviour) -> Self {
        self.behaviours.insert(business.to_string(), behaviour);
        self
    }

    /// Every search takes at least this long
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn probe(&self) -> Arc<ConcurrencyProbe> {
        Arc::clone(&self.probe)
    }

    fn behaviour_for(&self, query: &str) -> SearchBehaviour {
        self.behaviours
            .iter()
            .find(|(name, _)| query.starts_with(&format!("{name} ")))
            .map(|(_, behaviour)| behaviour.clone())
            .unwrap_or(SearchBehaviour::Hits(vec![]))
    }
}

#[async_trait]
impl SearchProvider for ScriptedSearch {
    async fn search(&self, query: &str) -> OrchestratorResult<SearchResponse> {
        self.probe.enter();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let behaviour = self.behaviour_for(query);
        self.probe.leave();

        match behaviour {
            SearchBehaviour::Hits(urls) => Ok(SearchResponse {
                success: true,
                items: urls.into_iter().map(|url| SearchItem { url, title: None }).collect(),
            }),
            SearchBehaviour::Fail => Err(OrchestratorError::unavailable("search", "HTTP 502")),
            SearchBehaviour::Stall => std::future::pending().await,
            SearchBehaviour::Panic => panic!("search collaborator blew up for {query}"),
        }
    }
}

/// Returns a caption record for known URLs and fails for anything else
#[derive(Default)]
pub struct CaptionScraper {
    captions: HashMap<String, String>,
}

impl CaptionScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caption(mut self, url: &str, caption: &str) -> Self {
        self.captions.insert(url.to_string(), caption.to_string());
        self
    }
}

#[async_trait]
impl ScrapeProvider for CaptionScraper {
    async fn scrape(&self, url: &str) -> OrchestratorResult<ScrapeResponse> {
        match self.captions.get(url) {
            Some(caption) => Ok(ScrapeResponse {
                success: true,
                content: json!([{ "url": url, "caption": caption }]),
            }),
            None => Err(OrchestratorError::unavailable("scrape", format!("no record for {url}"))),
        }
    }
}

/// Answers per business, recording every payload it receives
#[derive(Default)]
pub struct ScriptedExtractor {
    replies: HashMap<String, Vec<ToolInvocation>>,
    received: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, business: &str, invocations: Vec<ToolInvocation>) -> Self {
        self.replies.insert(business.to_string(), invocations);
        self
    }

    pub fn received(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.received)
    }

    fn business_of(payload: &str) -> Option<String> {
        let parsed: Value = serde_json::from_str(payload).ok()?;
        parsed.get(0)?.as_object()?.keys().next().cloned()
    }
}

#[async_trait]
impl DealExtractor for ScriptedExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> OrchestratorResult<Vec<ToolInvocation>> {
        self.received.lock().unwrap().push(request.payload.clone());

        let business = Self::business_of(&request.payload)
            .ok_or_else(|| OrchestratorError::parse("payload", "no business entry"))?;
        Ok(self.replies.get(&business).cloned().unwrap_or_default())
    }
}
