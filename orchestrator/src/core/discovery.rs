//! Search query composition and content-source URL filtering

use regex::Regex;
use url::Url;

use crate::traits::SearchResponse;

/// Fill the query template for one business
pub fn compose_query(template: &str, name: &str, location: &str) -> String {
    let query = template.replace("{name}", name.trim()).replace("{location}", location.trim());
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep content-source URLs among the first `limit` search hits.
///
/// A failed or empty search yields no URLs. Malformed and non-http(s) URLs are
/// skipped; duplicates keep their first position.
pub fn filter_content_urls(response: &SearchResponse, pattern: &Regex, limit: usize) -> Vec<String> {
    if !response.success {
        return Vec::new();
    }

    let mut urls: Vec<String> = Vec::new();
    for item in response.items.iter().take(limit) {
        let candidate = item.url.trim();
        let Ok(parsed) = Url::parse(candidate) else {
            continue;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            continue;
        }
        if pattern.is_match(candidate) && !urls.iter().any(|seen| seen == candidate) {
            urls.push(candidate.to_string());
        }
    }
    urls
}
