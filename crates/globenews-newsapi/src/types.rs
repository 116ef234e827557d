//! NewsAPI response types.
//!
//! Every response is a `{"status": "ok", ...}` envelope; failures carry
//! `"status": "error"` with a machine-readable `code`.

use serde::Deserialize;

/// Error envelope: `{"status": "error", "code": "...", "message": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `top-headlines/sources`.
#[derive(Debug, Deserialize)]
pub(crate) struct SourcesResponse {
    #[serde(default)]
    pub sources: Vec<SourceInfo>,
}

/// A publisher known to NewsAPI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Response of `everything`. Articles are kept as raw values so one
/// malformed entry does not fail the whole page.
#[derive(Debug, Deserialize)]
pub(crate) struct ArticlesResponse {
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<serde_json::Value>,
}
