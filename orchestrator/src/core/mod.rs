//! Core business logic modules
//!
//! This module contains pure business logic with no I/O dependencies.
//! Stage decisions (which URLs to keep, which caption wins, how tool calls
//! decode) and the join/merge bookkeeping live here so they can be tested
//! without collaborators.

pub mod captions;
pub mod discovery;
pub mod merge;
pub mod outcomes;
pub mod summary;

pub use captions::{record_caption, resolve_caption};
pub use discovery::{compose_query, filter_content_urls};
pub use merge::{merge_outcomes, sort_rows_by_name, unique_by_key};
pub use outcomes::{OrchestrationResult, OutcomeSlots};
pub use summary::{build_payload, decode_deal_result, system_prompt, SummaryDecode};
