//! Core types used throughout the deal lookup system

mod business;
mod deals;
mod outcome;

pub use business::{BusinessCandidate, LinkCaptionMap, MergedRecord, ResponseRow};
pub use deals::{BusinessDealResult, DealEntry, DealToolArguments};
pub use outcome::{ErrorKind, UnitOutcome, UnitStatus};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Used when a library is driven without a binary having claimed an identity (tests)
static FALLBACK_PROCESS_ID: ProcessId = ProcessId::Orchestrator;

/// Process identifier for the binaries in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Command line lookup runner
    Orchestrator,
    /// HTTP front end
    WebServer,
}

impl ProcessId {
    /// Initialize the global process ID for the CLI runner
    pub fn init_orchestrator() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Orchestrator)
    }

    /// Initialize the global process ID for the webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Get the global process ID
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&FALLBACK_PROCESS_ID)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Orchestrator => write!(f, "orchestrator"),
            ProcessId::WebServer => write!(f, "webserver"),
        }
    }
}
