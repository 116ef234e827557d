use thiserror::Error;

/// Errors returned by the OpenCage client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Transport failure. The request URL is stripped because it carries
    /// the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Daily quota used up (402) or requests sent too fast (429).
    #[error("geocoder rate limit exceeded (HTTP {status}): {message}")]
    RateLimited { status: u16, message: String },

    /// Any other non-success answer.
    #[error("geocoder returned unknown error (HTTP {status}): {message}")]
    Unknown { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid OpenCage URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}
