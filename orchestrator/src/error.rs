//! Orchestrator-specific error types

use thiserror::Error;
use shared::{ErrorKind, SharedError};

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Candidate source failed: {message}")]
    TotalFailure { message: String },

    #[error("Collaborator {collaborator} unavailable: {message}")]
    CollaboratorUnavailable { collaborator: String, message: String },

    #[error("Malformed {context}: {message}")]
    ParseError { context: String, message: String },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Required keys missing: {}", keys.join(", "))]
    RequiredKeyMissing { keys: Vec<String> },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

impl OrchestratorError {
    pub fn unavailable(collaborator: &str, message: impl ToString) -> Self {
        OrchestratorError::CollaboratorUnavailable {
            collaborator: collaborator.to_string(),
            message: message.to_string(),
        }
    }

    pub fn parse(context: &str, message: impl ToString) -> Self {
        OrchestratorError::ParseError {
            context: context.to_string(),
            message: message.to_string(),
        }
    }

    /// Classification recorded in a failed lane's outcome
    pub fn to_error_kind(&self) -> ErrorKind {
        match self {
            OrchestratorError::ParseError { .. } | OrchestratorError::JsonError(_) => {
                ErrorKind::ParseError(self.to_string())
            }
            _ => ErrorKind::CollaboratorUnavailable(self.to_string()),
        }
    }
}
