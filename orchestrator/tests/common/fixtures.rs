//! Test fixtures and data for orchestrator tests

use std::time::Duration;

use serde_json::json;
use shared::{BusinessCandidate, DealEntry, PipelineConfig};
use orchestrator::ToolInvocation;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const TOOL_NAME: &'static str = "generate_deal_entries_json";
    pub const MATCHA_POST: &'static str = "https://www.instagram.com/p/matcha1/";
    pub const MATCHA_CAPTION: &'static str = "BOGO matcha lattes every Friday! 12% off gelato with student ID";

    /// The two-business neighbourhood used by the end-to-end tests
    pub fn neighbourhood() -> Vec<BusinessCandidate> {
        vec![
            BusinessCandidate::new("MatchaTown", "Cupertino", 4.6, 210),
            BusinessCandidate::new("HeyTea", "Berkeley", 4.1, 95),
        ]
    }

    /// `count` distinct businesses named `Shop 0`, `Shop 1`, ...
    pub fn shops(count: usize) -> Vec<BusinessCandidate> {
        (0..count)
            .map(|i| BusinessCandidate::new(format!("Shop {i}"), "Oakland", 4.0, i as u32))
            .collect()
    }

    pub fn deal(deal_type: &str, description: &str, price: &str) -> DealEntry {
        DealEntry {
            deal_type: deal_type.to_string(),
            description: description.to_string(),
            price_or_discount: price.to_string(),
            availability: "Fridays".to_string(),
            source_links: vec![Self::MATCHA_POST.to_string()],
        }
    }

    /// Deal tool invocation carrying the given entries
    pub fn deal_invocation(store_name: &str, deals: &[DealEntry]) -> ToolInvocation {
        ToolInvocation {
            name: Self::TOOL_NAME.to_string(),
            arguments: json!({"store_name": store_name, "deals": deals}).to_string(),
        }
    }

    pub fn malformed_invocation() -> ToolInvocation {
        ToolInvocation {
            name: Self::TOOL_NAME.to_string(),
            arguments: r#"{"store_name": "HeyTea", "deals": [{"deal_type": "BOGO"}"#.to_string(),
        }
    }

    pub fn config(max_lanes: usize, lane_timeout: Duration) -> PipelineConfig {
        PipelineConfig {
            max_lanes,
            lane_timeout,
            ..PipelineConfig::default()
        }
    }
}
