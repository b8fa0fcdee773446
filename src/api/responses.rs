// src/api/responses.rs
//! List envelopes returned by the Notion API.

use serde_json::Value;

/// Generic paginated response wrapper.
///
/// Decoding is total: a missing `results` array is empty and a missing
/// `has_more` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResponse {
    pub results: Vec<Value>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl PaginatedResponse {
    pub fn from_value(value: Value) -> Self {
        let next_cursor = value
            .get("next_cursor")
            .and_then(Value::as_str)
            .map(str::to_string);
        let has_more = value
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let results = match value {
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(results)) => results,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Self {
            results,
            next_cursor,
            has_more,
        }
    }

    /// Logs a warning when the API reported more results than were returned.
    pub fn warn_if_truncated(&self, what: &str) {
        if self.has_more {
            log::warn!(
                "{} has more than {} results; only the first page was read (next cursor {:?})",
                what,
                self.results.len(),
                self.next_cursor
            );
        }
    }
}
