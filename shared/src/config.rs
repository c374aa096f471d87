//! Pipeline tuning shared by the CLI runner and the webserver

use regex::Regex;
use std::time::Duration;

use crate::errors::{SharedError, SharedResult};

pub const DEFAULT_CONTENT_URL_PATTERN: &str = r"^https?://(www\.)?instagram\.com/";
pub const DEFAULT_SEARCH_TEMPLATE: &str = "{name} {location} coupon OR deal OR promotion";
pub const DEFAULT_DEAL_TOOL_NAME: &str = "generate_deal_entries_json";

/// Knobs for the per-business lanes and their stages
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Upper bound on lanes running at once; the rest wait their turn
    pub max_lanes: usize,
    /// Deadline for one lane, measured from when it starts running
    pub lane_timeout: Duration,
    /// How many leading search results are considered per business
    pub max_search_results: usize,
    pub content_url_pattern: String,
    /// `{name}` and `{location}` are substituted per business
    pub search_query_template: String,
    pub deal_tool_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_lanes: 8,
            lane_timeout: Duration::from_secs(180),
            max_search_results: 5,
            content_url_pattern: DEFAULT_CONTENT_URL_PATTERN.to_string(),
            search_query_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
            deal_tool_name: DEFAULT_DEAL_TOOL_NAME.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Apply `DEALS_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DEALS_MAX_LANES") {
            self.max_lanes = parse_number("DEALS_MAX_LANES", &value)?;
        }
        if let Some(value) = lookup("DEALS_LANE_TIMEOUT_SECS") {
            self.lane_timeout = Duration::from_secs(parse_number("DEALS_LANE_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("DEALS_MAX_SEARCH_RESULTS") {
            self.max_search_results = parse_number("DEALS_MAX_SEARCH_RESULTS", &value)?;
        }
        if let Some(value) = lookup("DEALS_CONTENT_URL_PATTERN") {
            self.content_url_pattern = value;
        }
        if let Some(value) = lookup("DEALS_SEARCH_TEMPLATE") {
            self.search_query_template = value;
        }
        if let Some(value) = lookup("DEALS_TOOL_NAME") {
            self.deal_tool_name = value;
        }
        self.validate()?;
        Ok(self)
    }

    /// Apply overrides from the process environment
    pub fn from_env() -> SharedResult<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.max_lanes == 0 {
            return Err(SharedError::invalid_config("max_lanes", self.max_lanes));
        }
        if self.lane_timeout.is_zero() {
            return Err(SharedError::invalid_config("lane_timeout", "0s"));
        }
        if self.deal_tool_name.trim().is_empty() {
            return Err(SharedError::invalid_config("deal_tool_name", "<empty>"));
        }
        self.content_pattern()?;
        Ok(())
    }

    pub fn content_pattern(&self) -> SharedResult<Regex> {
        Regex::new(&self.content_url_pattern)
            .map_err(|_| SharedError::invalid_config("content_url_pattern", &self.content_url_pattern))
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> SharedResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SharedError::invalid_config(field, value))
}
