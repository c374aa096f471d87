//! Common test utilities and infrastructure
//!
//! Fixtures plus hand-written async fakes for the collaborator traits. The
//! fakes hold their shared state behind `Arc`s so a test can keep a handle
//! and inspect it after the orchestrator has taken ownership.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

pub use fakes::{CaptionScraper, ConcurrencyProbe, FakeCandidates, ScriptedExtractor, ScriptedSearch, SearchBehaviour};
pub use fixtures::TestFixtures;
