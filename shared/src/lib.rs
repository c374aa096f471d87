//! Shared types for the deal lookup system
//!
//! Contains the domain records that cross crate boundaries (candidates, deals,
//! per-business outcomes), pipeline configuration and process-aware logging.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::{PipelineConfig, DEFAULT_DEAL_TOOL_NAME};
pub use errors::*;
pub use types::*;
