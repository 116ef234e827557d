use thiserror::Error;

/// Errors returned by the NewsAPI client.
#[derive(Debug, Error)]
pub enum NewsApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NewsAPI answered with `"code": "rateLimited"`.
    #[error("NewsAPI rate limit exceeded: {0}")]
    RateLimited(String),

    /// NewsAPI answered with `"status": "error"`.
    #[error("NewsAPI error {code}: {message}")]
    Api { code: String, message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid NewsAPI URL: {0}")]
    InvalidUrl(String),
}
