use thiserror::Error;

/// Errors returned by the Dandelion client.
#[derive(Debug, Error)]
pub enum DandelionError {
    /// Transport failure. The request URL is stripped because it carries
    /// the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Any non-200 answer. Dandelion puts the reason in the body.
    #[error("Dandelion returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Dandelion URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for DandelionError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}
