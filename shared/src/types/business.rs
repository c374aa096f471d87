use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::deals::DealEntry;

/// A nearby business as reported by the candidate source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCandidate {
    pub name: String,
    /// Short location label, e.g. "Cupertino Village"
    pub location: String,
    pub rating: f64,
    pub review_count: u32,
}

impl BusinessCandidate {
    pub fn new(name: impl Into<String>, location: impl Into<String>, rating: f64, review_count: u32) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            rating,
            review_count,
        }
    }

    /// Identity key within one request
    pub fn key(&self) -> &str {
        &self.name
    }
}

/// Source URL -> caption for a single business. Sorted by URL so that two
/// extractions over identical scrape responses compare equal.
pub type LinkCaptionMap = BTreeMap<String, String>;

/// Candidate fields with the deals found for it appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub review_count: u32,
    pub deals: Vec<DealEntry>,
}

/// Wire shape of one merged record: `[name, location, rating, review_count, deals]`
pub type ResponseRow = (String, String, f64, u32, Vec<DealEntry>);

impl MergedRecord {
    pub fn from_candidate(candidate: &BusinessCandidate, deals: Vec<DealEntry>) -> Self {
        Self {
            name: candidate.name.clone(),
            location: candidate.location.clone(),
            rating: candidate.rating,
            review_count: candidate.review_count,
            deals,
        }
    }

    pub fn into_row(self) -> ResponseRow {
        (self.name, self.location, self.rating, self.review_count, self.deals)
    }
}
