use serde::{Deserialize, Serialize};

/// One promotional offer extracted for a business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealEntry {
    pub deal_type: String,
    pub description: String,
    pub price_or_discount: String,
    pub availability: String,
    pub source_links: Vec<String>,
}

/// Deals found for one dispatched business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDealResult {
    pub business_name: String,
    pub deals: Vec<DealEntry>,
}

impl BusinessDealResult {
    pub fn empty(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            deals: Vec::new(),
        }
    }
}

/// Argument schema of the deal generation tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealToolArguments {
    #[serde(default)]
    pub store_name: Option<String>,
    pub deals: Vec<DealEntry>,
}
