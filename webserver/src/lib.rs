//! Webserver library for the deal lookup front end
//!
//! Exposes the deal lookup over HTTP for the browser client: a location
//! submission endpoint plus status and health probes.

pub mod error;
pub mod state;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::{WebServer, DEFAULT_ALLOWED_ORIGIN};
