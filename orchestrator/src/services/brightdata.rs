//! BrightData bindings: Google SERP through the request API and
//! Instagram post scraping through the dataset API

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::http::{endpoint, ensure_success, read_json};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{ScrapeProvider, ScrapeResponse, SearchItem, SearchProvider, SearchResponse};

pub const BRIGHTDATA_BASE_URL: &str = "https://api.brightdata.com";
pub const INSTAGRAM_POSTS_DATASET: &str = "gd_lk5ns7kz21pck8jpis";
const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

#[derive(Debug, Deserialize)]
struct SerpPage {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    link: Option<String>,
    title: Option<String>,
}

/// Google search results via a BrightData SERP zone
pub struct BrightDataSearch {
    client: reqwest::Client,
    token: String,
    zone: String,
    base_url: String,
}

impl BrightDataSearch {
    pub fn new(client: reqwest::Client, token: String, zone: String) -> Self {
        Self {
            client,
            token,
            zone,
            base_url: BRIGHTDATA_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    fn serp_url(query: &str) -> OrchestratorResult<Url> {
        Url::parse_with_params(GOOGLE_SEARCH_URL, &[("q", query), ("brd_json", "1")])
            .map_err(|e| OrchestratorError::parse("search url", e))
    }
}

#[async_trait]
impl SearchProvider for BrightDataSearch {
    async fn search(&self, query: &str) -> OrchestratorResult<SearchResponse> {
        let body = json!({
            "zone": self.zone,
            "url": Self::serp_url(query)?.as_str(),
            "format": "raw",
        });

        let sent = self
            .client
            .post(endpoint(&self.base_url, "request"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await;
        let response = ensure_success("brightdata-serp", sent).await?;
        let page: SerpPage = read_json("brightdata-serp", response).await?;

        let items = page
            .organic
            .into_iter()
            .filter_map(|hit| hit.link.map(|url| SearchItem { url, title: hit.title }))
            .collect();
        Ok(SearchResponse { success: true, items })
    }
}

/// Instagram post records via a BrightData dataset
pub struct BrightDataScraper {
    client: reqwest::Client,
    token: String,
    dataset_id: String,
    base_url: String,
}

impl BrightDataScraper {
    pub fn new(client: reqwest::Client, token: String) -> Self {
        Self {
            client,
            token,
            dataset_id: INSTAGRAM_POSTS_DATASET.to_string(),
            base_url: BRIGHTDATA_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

#[async_trait]
impl ScrapeProvider for BrightDataScraper {
    async fn scrape(&self, url: &str) -> OrchestratorResult<ScrapeResponse> {
        let sent = self
            .client
            .post(endpoint(&self.base_url, "datasets/v3/scrape"))
            .query(&[("dataset_id", self.dataset_id.as_str()), ("format", "json")])
            .bearer_auth(&self.token)
            .json(&json!([{ "url": url }]))
            .send()
            .await;
        let response = ensure_success("brightdata-scrape", sent).await?;
        let records: Value = read_json("brightdata-scrape", response).await?;

        // The dataset answers with a list of records, one per input URL
        let content = match records {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            Value::Array(_) | Value::Null => return Ok(ScrapeResponse::default()),
            other => other,
        };
        Ok(ScrapeResponse { success: true, content })
    }
}
