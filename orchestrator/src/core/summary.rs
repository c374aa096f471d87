//! Deal summarization protocol: request payload and tool-call decoding

use serde_json::{Map, Value};
use shared::{BusinessDealResult, DealToolArguments, LinkCaptionMap};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::ToolInvocation;

/// Fixed instruction sent ahead of every payload; `{tool}` names the deal tool
pub const SYSTEM_PROMPT: &str = r#"You extract promotional deals for local businesses.

The input is a JSON list holding one object. Its single key is the business name and its value
maps source links to the caption text found at that link:

[
  {
    "<business name>": {
      "<source link>": "<caption>",
      "<source link 2>": "<caption 2>"
    }
  }
]

Rules:
- Use ONLY the provided input data.
- Do NOT invent deals that the captions do not state.
- Prefer deals specific to this business and its location.
- Every deal entry MUST include deal_type, description, price_or_discount, availability and
  source_links (the links the deal was read from).
- If the captions contain no deals, return an empty deals list.

Call the {tool} tool exactly once for the business, with arguments
{"store_name": "<business name>", "deals": [...]}.
Return no text outside of tool calls."#;

/// System instruction for the configured deal tool
pub fn system_prompt(tool_name: &str) -> String {
    SYSTEM_PROMPT.replace("{tool}", tool_name)
}

/// JSON payload for one business
pub fn build_payload(business_name: &str, captions: &LinkCaptionMap) -> OrchestratorResult<String> {
    let mut entry = Map::new();
    entry.insert(business_name.to_string(), serde_json::to_value(captions)?);
    Ok(serde_json::to_string(&Value::Array(vec![Value::Object(entry)]))?)
}

/// Decoded summarization reply plus protocol anomalies worth logging
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDecode {
    pub result: BusinessDealResult,
    /// Deal tool invocations beyond the first, which are ignored
    pub extra_invocations: usize,
    /// `store_name` the model reported when it differs from the dispatched business
    pub store_name_mismatch: Option<String>,
}

/// Interpret the tool invocations returned for `business_name`.
///
/// Invocations named other than `tool_name` are ignored. No deal invocation
/// means the captions held no deals. When several arrive only the first is used.
pub fn decode_deal_result(
    business_name: &str,
    invocations: &[ToolInvocation],
    tool_name: &str,
) -> OrchestratorResult<SummaryDecode> {
    let mut deal_calls = invocations.iter().filter(|call| call.name == tool_name);

    let Some(first) = deal_calls.next() else {
        return Ok(SummaryDecode {
            result: BusinessDealResult::empty(business_name),
            extra_invocations: 0,
            store_name_mismatch: None,
        });
    };
    let extra_invocations = deal_calls.count();

    let arguments: DealToolArguments = serde_json::from_str(&first.arguments)
        .map_err(|e| OrchestratorError::parse(&format!("{tool_name} arguments"), e))?;

    let store_name_mismatch = arguments
        .store_name
        .filter(|reported| !reported.trim().eq_ignore_ascii_case(business_name.trim()));

    Ok(SummaryDecode {
        result: BusinessDealResult {
            business_name: business_name.to_string(),
            deals: arguments.deals,
        },
        extra_invocations,
        store_name_mismatch,
    })
}
