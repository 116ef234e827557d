use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::DandelionError;
use crate::types::{Annotation, NexResponse};

const DEFAULT_BASE_URL: &str = "https://api.dandelion.eu/";
const NEX_PATH: &str = "datatxt/nex/v1/";

/// DBpedia ontology type that marks an annotation as a place.
pub const PLACE_TYPE: &str = "http://dbpedia.org/ontology/Place";

/// Client for the Dandelion entity-extraction endpoint.
pub struct DandelionClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl DandelionClient {
    /// Creates a client pointed at the production Dandelion API.
    ///
    /// # Errors
    ///
    /// Returns [`DandelionError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, DandelionError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DandelionError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`DandelionError::InvalidUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, DandelionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("globenews/0.1 (article-extraction)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| DandelionError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
        })
    }

    /// Annotates the page at `article_url` and returns its place entities,
    /// highest confidence first.
    ///
    /// # Errors
    ///
    /// - [`DandelionError::Status`] for any non-200 response.
    /// - [`DandelionError::Http`] on network failure.
    /// - [`DandelionError::Deserialize`] if the body is not the expected
    ///   shape.
    pub async fn extract_places(
        &self,
        article_url: &str,
    ) -> Result<Vec<Annotation>, DandelionError> {
        let url = self.nex_url(article_url)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(DandelionError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let body: NexResponse =
            serde_json::from_str(&text).map_err(|e| DandelionError::Deserialize {
                context: format!("nex(url={article_url})"),
                source: e,
            })?;

        Ok(filter_places(body.annotations))
    }

    fn nex_url(&self, article_url: &str) -> Result<Url, DandelionError> {
        let mut url = self
            .base_url
            .join(NEX_PATH)
            .map_err(|e| DandelionError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("lang", "en")
            .append_pair("url", article_url)
            .append_pair("include", "types")
            .append_pair("token", &self.token);
        Ok(url)
    }
}

/// Keep annotations typed as [`PLACE_TYPE`], sorted by descending confidence.
///
/// The sort is stable, so equally confident places keep their order of
/// appearance in the text.
#[must_use]
pub fn filter_places(annotations: Vec<Annotation>) -> Vec<Annotation> {
    let mut places: Vec<Annotation> = annotations
        .into_iter()
        .filter(|a| a.types.iter().any(|t| t == PLACE_TYPE))
        .collect();
    places.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    places
}

/// Pull `message` out of a Dandelion error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.chars().take(200).collect())
}
