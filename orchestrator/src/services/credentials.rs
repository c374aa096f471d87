//! Collaborator credentials from the environment
//!
//! Keys are read from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values.
//!
//! ## Required Keys
//! - `GOOGLE_PLACES_API_KEY`: Places nearby search
//! - `BRIGHTDATA_API_TOKEN`: SERP and post scraping
//! - `LETTA_API_TOKEN`, `LETTA_AGENT_ID`: deal extraction agent
//!
//! ## Optional Keys
//! - `BRIGHTDATA_SERP_ZONE`: SERP zone name, `serp_api1` when unset

use std::collections::HashMap;
use std::path::Path;

use crate::error::{OrchestratorError, OrchestratorResult};

pub const DEFAULT_SERP_ZONE: &str = "serp_api1";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub places_api_key: String,
    pub brightdata_token: String,
    pub serp_zone: String,
    pub letta_token: String,
    pub letta_agent_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("serp_zone", &self.serp_zone)
            .field("letta_agent_id", &self.letta_agent_id)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    const REQUIRED_KEYS: &'static [&'static str] = &[
        "GOOGLE_PLACES_API_KEY",
        "BRIGHTDATA_API_TOKEN",
        "LETTA_API_TOKEN",
        "LETTA_AGENT_ID",
    ];

    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> OrchestratorResult<Self> {
        // No .env file is fine
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a specific env file; variables already set in the process win
    pub fn from_env_file(path: &Path) -> OrchestratorResult<Self> {
        let entries = dotenv::from_path_iter(path).map_err(|e| OrchestratorError::ConfigurationError {
            field: format!("{}: {e}", path.display()),
        })?;

        let mut file_values = HashMap::new();
        for entry in entries {
            let (key, value) = entry.map_err(|e| OrchestratorError::ConfigurationError {
                field: format!("{}: {e}", path.display()),
            })?;
            file_values.insert(key, value);
        }

        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file_values.get(key).cloned()))
    }

    /// Build from any key lookup; every missing required key is reported at once
    pub fn from_lookup<F>(lookup: F) -> OrchestratorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let missing: Vec<String> = Self::REQUIRED_KEYS
            .iter()
            .filter(|key| read(key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(OrchestratorError::RequiredKeyMissing { keys: missing });
        }

        Ok(Self {
            places_api_key: read("GOOGLE_PLACES_API_KEY").unwrap_or_default(),
            brightdata_token: read("BRIGHTDATA_API_TOKEN").unwrap_or_default(),
            serp_zone: read("BRIGHTDATA_SERP_ZONE").unwrap_or_else(|| DEFAULT_SERP_ZONE.to_string()),
            letta_token: read("LETTA_API_TOKEN").unwrap_or_default(),
            letta_agent_id: read("LETTA_AGENT_ID").unwrap_or_default(),
        })
    }
}
