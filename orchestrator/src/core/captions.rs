//! Caption resolution over scraped post records

use serde_json::Value;
use shared::LinkCaptionMap;

use crate::traits::ScrapeResponse;

/// First populated caption-like field of a post record, trimmed.
///
/// Checked in order: `caption`, `description`, then the nested
/// `edge_media_to_caption.edges[0].node.text`. When the scraper hands back a
/// list of records, the first record is used.
pub fn resolve_caption(content: &Value) -> Option<String> {
    let record = match content {
        Value::Array(records) => records.first()?,
        other => other,
    };

    let nested = record
        .pointer("/edge_media_to_caption/edges/0/node/text")
        .and_then(Value::as_str);

    [
        record.get("caption").and_then(Value::as_str),
        record.get("description").and_then(Value::as_str),
        nested,
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|caption| !caption.is_empty())
    .map(str::to_string)
}

/// Add the caption behind `url` to `map`; returns whether an entry was written.
pub fn record_caption(map: &mut LinkCaptionMap, url: &str, response: &ScrapeResponse) -> bool {
    if !response.success {
        return false;
    }
    match resolve_caption(&response.content) {
        Some(caption) => {
            map.insert(url.to_string(), caption);
            true
        }
        None => false,
    }
}
