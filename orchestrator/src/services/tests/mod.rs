//! Service-specific tests
//!
//! HTTP bindings run against a local wiremock server; credential loading
//! uses temporary env files.


// Common test utilities for services
pub mod common {
    use std::time::Duration;

    /// Client for talking to the mock server
    pub fn test_client() -> reqwest::Client {
        crate::services::http::build_client(Duration::from_secs(5)).expect("client builds")
    }
}
