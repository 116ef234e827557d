use std::time::Duration;

use globenews_core::LatLong;
use reqwest::{Client, StatusCode, Url};

use crate::error::GeocodeError;
use crate::types::GeocodeResponse;

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/";

/// Client for OpenCage forward geocoding.
pub struct OpenCageClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl OpenCageClient {
    /// Creates a client pointed at the production OpenCage API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeocodeError::InvalidUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("globenews/0.1 (article-extraction)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GeocodeError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Resolves `place_name` to the coordinates of the best match.
    ///
    /// Returns `Ok(None)` when OpenCage has no result for the name.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::RateLimited`] on HTTP 402 or 429.
    /// - [`GeocodeError::Unknown`] on any other non-success status.
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected shape.
    pub async fn resolve(&self, place_name: &str) -> Result<Option<LatLong>, GeocodeError> {
        let url = self.geocode_url(place_name)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed = serde_json::from_str::<GeocodeResponse>(&text);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.status)
                .map_or_else(|| text.chars().take(200).collect(), |s| s.message);
            return Err(classify_status(status, message));
        }

        let body = parsed.map_err(|e| GeocodeError::Deserialize {
            context: format!("geocode(q={place_name})"),
            source: e,
        })?;

        Ok(body.results.into_iter().next().map(|r| LatLong {
            lat: r.geometry.lat,
            long: r.geometry.lng,
        }))
    }

    fn geocode_url(&self, place_name: &str) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("geocode/v1/json")
            .map_err(|e| GeocodeError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("q", place_name)
            .append_pair("key", &self.api_key)
            .append_pair("limit", "1")
            .append_pair("no_annotations", "1");
        Ok(url)
    }
}

fn classify_status(status: StatusCode, message: String) -> GeocodeError {
    match status {
        StatusCode::PAYMENT_REQUIRED | StatusCode::TOO_MANY_REQUESTS => {
            GeocodeError::RateLimited {
                status: status.as_u16(),
                message,
            }
        }
        _ => GeocodeError::Unknown {
            status: status.as_u16(),
            message,
        },
    }
}
