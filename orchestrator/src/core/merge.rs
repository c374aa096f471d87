//! Merging lane outcomes back onto the candidate list

use std::collections::{HashMap, HashSet};

use shared::{BusinessCandidate, MergedRecord, UnitOutcome};

use super::outcomes::OrchestrationResult;

/// One record per candidate, in candidate order. Candidates whose outcome is
/// missing or failed get an empty deal list.
pub fn merge_outcomes(candidates: &[BusinessCandidate], result: &OrchestrationResult) -> Vec<MergedRecord> {
    let mut by_key: HashMap<&str, &UnitOutcome> = HashMap::with_capacity(result.len());
    for outcome in result.outcomes() {
        by_key.entry(outcome.business_key.as_str()).or_insert(outcome);
    }

    candidates
        .iter()
        .map(|candidate| {
            let deals = by_key
                .get(candidate.key())
                .map(|outcome| outcome.deals().to_vec())
                .unwrap_or_default();
            MergedRecord::from_candidate(candidate, deals)
        })
        .collect()
}

/// Candidates with repeated keys removed, first occurrence kept
pub fn unique_by_key(candidates: &[BusinessCandidate]) -> Vec<BusinessCandidate> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|candidate| seen.insert(candidate.key().to_string()))
        .cloned()
        .collect()
}

/// Stable ordering by business name for the HTTP response
pub fn sort_rows_by_name(mut records: Vec<MergedRecord>) -> Vec<MergedRecord> {
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}
