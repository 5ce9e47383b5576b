//! Hub response envelope
//!
//! The Hub API wraps every payload as `{ "data": ..., "errors": [...] }`.

use serde::{Deserialize, Serialize};

/// A single error reported by the Hub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub detail: String,
}

/// Successful Hub response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

/// Extract the human-readable message from a failed response body
///
/// Prefers the first `errors[].detail` of a Hub envelope, then the raw body.
/// Returns `None` for an empty body so the caller can fall back to the HTTP
/// status text.
pub fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(detail) = parsed
            .errors
            .into_iter()
            .map(|e| e.detail)
            .find(|d| !d.is_empty())
        {
            return Some(detail);
        }
    }

    Some(body.to_string())
}
