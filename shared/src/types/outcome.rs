use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::business::BusinessCandidate;
use super::deals::{BusinessDealResult, DealEntry};

/// Terminal state of one business lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    Succeeded,
    Failed,
}

/// Why a lane ended in `Failed`
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("malformed extraction arguments: {0}")]
    ParseError(String),

    #[error("lane deadline exceeded")]
    Timeout,

    #[error("lane aborted: {0}")]
    LaneAborted(String),
}

/// Result of running one business through discovery, extraction and summarization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOutcome {
    pub business_key: String,
    pub status: UnitStatus,
    pub result: Option<BusinessDealResult>,
    pub error: Option<ErrorKind>,
    pub input: BusinessCandidate,
    pub elapsed_ms: u64,
}

impl UnitOutcome {
    pub fn succeeded(input: BusinessCandidate, result: BusinessDealResult, elapsed_ms: u64) -> Self {
        Self {
            business_key: input.key().to_string(),
            status: UnitStatus::Succeeded,
            result: Some(result),
            error: None,
            input,
            elapsed_ms,
        }
    }

    pub fn failed(input: BusinessCandidate, error: ErrorKind, elapsed_ms: u64) -> Self {
        Self {
            business_key: input.key().to_string(),
            status: UnitStatus::Failed,
            result: None,
            error: Some(error),
            input,
            elapsed_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == UnitStatus::Succeeded
    }

    /// Deals to publish for this business; failures publish none
    pub fn deals(&self) -> &[DealEntry] {
        match (&self.status, &self.result) {
            (UnitStatus::Succeeded, Some(result)) => &result.deals,
            _ => &[],
        }
    }
}
