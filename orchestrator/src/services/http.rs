//! Plumbing shared by the HTTP collaborator bindings

use std::time::Duration;

use crate::error::{OrchestratorError, OrchestratorResult};

/// Client with a whole-request timeout, so a stalled collaborator surfaces as an error
pub fn build_client(timeout: Duration) -> OrchestratorResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| OrchestratorError::ConfigurationError {
            field: format!("http client: {e}"),
        })
}

/// Map transport errors and non-2xx statuses to `CollaboratorUnavailable`
pub async fn ensure_success(
    collaborator: &str,
    sent: Result<reqwest::Response, reqwest::Error>,
) -> OrchestratorResult<reqwest::Response> {
    let response = sent.map_err(|e| OrchestratorError::unavailable(collaborator, e))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();
    Err(OrchestratorError::unavailable(collaborator, format!("HTTP {status}: {snippet}")))
}

/// Decode a JSON body; an undecodable reply counts as the collaborator being unavailable
pub async fn read_json<T: serde::de::DeserializeOwned>(collaborator: &str, response: reqwest::Response) -> OrchestratorResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| OrchestratorError::unavailable(collaborator, e))?;
    serde_json::from_slice(&bytes).map_err(|e| OrchestratorError::unavailable(collaborator, format!("undecodable reply: {e}")))
}

/// Join a base URL and a path without doubling slashes
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
