//! WebServer-specific error types

use thiserror::Error;
use orchestrator::OrchestratorError;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed on {address}: {message}")]
    ServerStartupFailed { address: String, message: String },

    #[error("Invalid allowed origin: {origin}")]
    InvalidOrigin { origin: String },

    #[error("Deal lookup setup failed: {0}")]
    Orchestrator(#[from] OrchestratorError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;
