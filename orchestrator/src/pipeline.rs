//! Per-business lane: discovery -> extraction -> summarization
//!
//! Steps within a lane run strictly one after another; concurrency happens
//! across lanes (see `orchestrator`). Discovery and extraction absorb their
//! collaborators' failures; only summarization can fail a lane.

use std::sync::Arc;

use regex::Regex;
use shared::{process_debug, process_warn, BusinessCandidate, BusinessDealResult, LinkCaptionMap, PipelineConfig, ProcessId};

use crate::core::{build_payload, compose_query, decode_deal_result, filter_content_urls, record_caption, system_prompt};
use crate::error::OrchestratorResult;
use crate::traits::{DealExtractor, ExtractionRequest, ScrapeProvider, SearchProvider};

/// Stage parameters resolved once from `PipelineConfig`
#[derive(Debug)]
struct StageSettings {
    content_pattern: Regex,
    query_template: String,
    max_search_results: usize,
    deal_tool_name: String,
    system_prompt: String,
}

/// Runs the three stages for one business against shared collaborators
pub struct LanePipeline<S, P, E> {
    search: Arc<S>,
    scraper: Arc<P>,
    extractor: Arc<E>,
    settings: Arc<StageSettings>,
}

impl<S, P, E> Clone for LanePipeline<S, P, E> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
            scraper: Arc::clone(&self.scraper),
            extractor: Arc::clone(&self.extractor),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<S, P, E> LanePipeline<S, P, E>
where
    S: SearchProvider + 'static,
    P: ScrapeProvider + 'static,
    E: DealExtractor + 'static,
{
    pub fn new(search: S, scraper: P, extractor: E, config: &PipelineConfig) -> OrchestratorResult<Self> {
        config.validate()?;
        let settings = StageSettings {
            content_pattern: config.content_pattern()?,
            query_template: config.search_query_template.clone(),
            max_search_results: config.max_search_results,
            deal_tool_name: config.deal_tool_name.clone(),
            system_prompt: system_prompt(&config.deal_tool_name),
        };

        Ok(Self {
            search: Arc::new(search),
            scraper: Arc::new(scraper),
            extractor: Arc::new(extractor),
            settings: Arc::new(settings),
        })
    }

    /// Content-source URLs mentioning promotions for this business
    pub async fn discover(&self, business: &BusinessCandidate) -> Vec<String> {
        let query = compose_query(&self.settings.query_template, &business.name, &business.location);

        match self.search.search(&query).await {
            Ok(response) => {
                let urls = filter_content_urls(&response, &self.settings.content_pattern, self.settings.max_search_results);
                process_debug!(
                    ProcessId::current(),
                    business = %business.name,
                    hits = response.items.len(),
                    kept = urls.len(),
                    "🔎 Discovery finished"
                );
                urls
            }
            Err(e) => {
                process_warn!(ProcessId::current(), business = %business.name, error = %e, "Search failed, continuing without URLs");
                Vec::new()
            }
        }
    }

    /// Captions for each URL; URLs that fail to scrape or have no caption are skipped
    pub async fn extract(&self, urls: &[String]) -> LinkCaptionMap {
        let mut captions = LinkCaptionMap::new();
        for url in urls {
            match self.scraper.scrape(url).await {
                Ok(response) => {
                    if !record_caption(&mut captions, url, &response) {
                        process_debug!(ProcessId::current(), %url, "No caption resolved, skipping");
                    }
                }
                Err(e) => {
                    process_warn!(ProcessId::current(), %url, error = %e, "Scrape failed, skipping URL");
                }
            }
        }
        captions
    }

    /// One extraction call for the business; an empty map still goes out
    pub async fn summarize(&self, business_name: &str, captions: &LinkCaptionMap) -> OrchestratorResult<BusinessDealResult> {
        let request = ExtractionRequest {
            system_prompt: self.settings.system_prompt.clone(),
            payload: build_payload(business_name, captions)?,
        };

        let invocations = self.extractor.extract(&request).await?;
        let decoded = decode_deal_result(business_name, &invocations, &self.settings.deal_tool_name)?;

        if decoded.extra_invocations > 0 {
            process_warn!(
                ProcessId::current(),
                business = %business_name,
                extra = decoded.extra_invocations,
                "⚠️ Multiple deal invocations returned, using the first"
            );
        }
        if let Some(reported) = &decoded.store_name_mismatch {
            process_warn!(
                ProcessId::current(),
                business = %business_name,
                reported = %reported,
                "⚠️ Deal invocation reported a different store name"
            );
        }

        Ok(decoded.result)
    }

    /// Full lane for one business
    pub async fn run(&self, business: &BusinessCandidate) -> OrchestratorResult<BusinessDealResult> {
        let urls = self.discover(business).await;
        let captions = self.extract(&urls).await;
        self.summarize(&business.name, &captions).await
    }
}
