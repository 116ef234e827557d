//! HTTP client for the NewsAPI v2 REST API.
//!
//! Wraps `reqwest` with NewsAPI-specific error handling and API key
//! management. The key travels in the `X-Api-Key` header so it never shows up
//! in logged URLs.

use std::time::Duration;

use chrono::NaiveDate;
use globenews_core::Article;
use reqwest::{Client, Url};

use crate::error::NewsApiError;
use crate::types::{ArticlesResponse, ErrorEnvelope, SourceInfo, SourcesResponse};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// Articles requested per call. Only the first page is ever fetched.
pub const PAGE_SIZE: u32 = 25;

/// Client for the NewsAPI REST API.
///
/// Use [`NewsApiClient::new`] for production or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production NewsAPI.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, NewsApiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`NewsApiError::InvalidUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("globenews/0.1 (article-extraction)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| NewsApiError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Lists every source publishing in `language` (e.g. `"en"`).
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::Api`] / [`NewsApiError::RateLimited`] if NewsAPI
    ///   returns an error envelope.
    /// - [`NewsApiError::Http`] on network failure.
    /// - [`NewsApiError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn list_sources(&self, language: &str) -> Result<Vec<SourceInfo>, NewsApiError> {
        let url = self.build_url("top-headlines/sources", &[("language", language)])?;
        let body = self.request_json(&url).await?;

        let response: SourcesResponse =
            serde_json::from_value(body).map_err(|e| NewsApiError::Deserialize {
                context: format!("sources(language={language})"),
                source: e,
            })?;

        Ok(response.sources)
    }

    /// Fetches one page of English articles from the given comma-joined
    /// source selector.
    ///
    /// An empty selector omits the `sources` filter entirely; NewsAPI then
    /// rejects the request for lacking a query, which surfaces as
    /// [`NewsApiError::Api`].
    ///
    /// # Errors
    ///
    /// Same as [`NewsApiClient::list_sources`].
    pub async fn fetch_articles(&self, sources: &str) -> Result<Vec<Article>, NewsApiError> {
        let page_size = PAGE_SIZE.to_string();
        let mut params = vec![("language", "en"), ("pageSize", page_size.as_str())];
        if !sources.is_empty() {
            params.push(("sources", sources));
        }

        let url = self.build_url("everything", &params)?;
        self.fetch_everything(&url, &format!("everything(sources={sources})"))
            .await
    }

    /// Searches English articles by free-text query, most relevant first,
    /// optionally restricted to articles published on or after `from`.
    ///
    /// # Errors
    ///
    /// Same as [`NewsApiClient::list_sources`].
    pub async fn search(
        &self,
        query: &str,
        from: Option<NaiveDate>,
    ) -> Result<Vec<Article>, NewsApiError> {
        let page_size = PAGE_SIZE.to_string();
        // Bind the owned string outside the if block so the borrow lives long enough.
        let from_param;
        let mut params = vec![
            ("q", query),
            ("language", "en"),
            ("sortBy", "relevancy"),
            ("pageSize", page_size.as_str()),
        ];
        if let Some(date) = from {
            from_param = date.format("%Y-%m-%d").to_string();
            params.push(("from", &from_param));
        }

        let url = self.build_url("everything", &params)?;
        self.fetch_everything(&url, &format!("everything(q={query})"))
            .await
    }

    async fn fetch_everything(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<Vec<Article>, NewsApiError> {
        let body = self.request_json(url).await?;

        let response: ArticlesResponse =
            serde_json::from_value(body).map_err(|e| NewsApiError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        let total = response.articles.len();
        let articles: Vec<Article> = response
            .articles
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<Article>(raw) {
                Ok(article) => Some(article),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed NewsAPI article");
                    None
                }
            })
            .collect();

        tracing::debug!(
            context,
            total_results = response.total_results,
            received = total,
            usable = articles.len(),
            "fetched NewsAPI articles"
        );

        Ok(articles)
    }

    /// Builds the endpoint URL with percent-encoded query parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, NewsApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| NewsApiError::InvalidUrl(format!("'{path}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and parses the body as JSON, converting NewsAPI
    /// error envelopes into typed errors.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, NewsApiError> {
        let response = self
            .client
            .get(url.clone())
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed = serde_json::from_str::<serde_json::Value>(&text);
        if let Some(err) = parsed.as_ref().ok().and_then(Self::error_from_envelope) {
            return Err(err);
        }

        if !status.is_success() {
            return Err(NewsApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: redact(url),
            });
        }

        parsed.map_err(|e| NewsApiError::Deserialize {
            context: redact(url),
            source: e,
        })
    }

    /// Converts an `"status": "error"` envelope into a [`NewsApiError`].
    fn error_from_envelope(body: &serde_json::Value) -> Option<NewsApiError> {
        let envelope: ErrorEnvelope = serde_json::from_value(body.clone()).ok()?;
        if envelope.status != "error" {
            return None;
        }
        let code = envelope.code.unwrap_or_else(|| "unknown".to_string());
        let message = envelope
            .message
            .unwrap_or_else(|| "unknown error".to_string());
        Some(if code == "rateLimited" {
            NewsApiError::RateLimited(message)
        } else {
            NewsApiError::Api { code, message }
        })
    }
}

/// Path of `url` without its query string, for error messages.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
