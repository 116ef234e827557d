//! Trait implementations over the concrete API clients and the Postgres
//! store, plus the constructor the binaries use to wire them together.

use std::sync::Arc;

use async_trait::async_trait;
use globenews_core::{AppConfig, Article, EnrichedArticle, LatLong};
use globenews_dandelion::{Annotation, DandelionClient, DandelionError};
use globenews_db::{DbError, InsertOutcome};
use globenews_newsapi::{encode_sources, pick_sources, NewsApiClient, SourceInfo, NUM_SOURCES};
use globenews_opencage::{GeocodeError, OpenCageClient};
use sqlx::PgPool;

use crate::error::PipelineError;
use crate::pipeline::EnrichmentPipeline;
use crate::traits::{ArticleStore, Geocoder, NewsSource, PlaceExtractor};

const SOURCE_LANGUAGE: &str = "en";

/// [`NewsSource`] backed by NewsAPI.
pub struct NewsApiSource {
    client: NewsApiClient,
}

impl NewsApiSource {
    #[must_use]
    pub fn new(client: NewsApiClient) -> Self {
        Self { client }
    }
}

fn random_selector(sources: Vec<SourceInfo>) -> String {
    let picked = pick_sources(sources, NUM_SOURCES, &mut rand::rng());
    encode_sources(&picked)
}

#[async_trait]
impl NewsSource for NewsApiSource {
    async fn source_selector(&self) -> String {
        match self.client.list_sources(SOURCE_LANGUAGE).await {
            Ok(sources) => {
                tracing::debug!(available = sources.len(), "listed news sources");
                random_selector(sources)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to list news sources");
                String::new()
            }
        }
    }

    async fn fetch_articles(&self, selector: &str) -> Vec<Article> {
        match self.client.fetch_articles(selector).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch articles");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl PlaceExtractor for DandelionClient {
    async fn extract_places(&self, article: &Article) -> Result<Vec<Annotation>, DandelionError> {
        DandelionClient::extract_places(self, &article.url).await
    }
}

#[async_trait]
impl Geocoder for OpenCageClient {
    async fn resolve(&self, place_name: &str) -> Result<Option<LatLong>, GeocodeError> {
        OpenCageClient::resolve(self, place_name).await
    }
}

/// [`ArticleStore`] over the `articles` table.
#[derive(Clone)]
pub struct PgArticleStore {
    pool: PgPool,
}

impl PgArticleStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn exists(&self, slug: &str) -> Result<bool, DbError> {
        globenews_db::article_exists(&self.pool, slug).await
    }

    async fn insert(&self, article: &EnrichedArticle) -> Result<InsertOutcome, DbError> {
        globenews_db::insert_article(&self.pool, article).await
    }

    async fn sample(&self, n: i64) -> Result<Vec<EnrichedArticle>, DbError> {
        globenews_db::sample_articles(&self.pool, n).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        globenews_db::health_check(&self.pool).await
    }
}

/// Missing keys are allowed so the service still serves stored articles;
/// the affected API calls fail and get logged on every run.
fn api_key<'a>(key: Option<&'a str>, var: &str) -> &'a str {
    key.unwrap_or_else(|| {
        tracing::warn!(var, "API key not set; calls to this service will fail");
        ""
    })
}

/// Builds the production pipeline from configuration and a connected pool.
///
/// # Errors
///
/// Returns [`PipelineError`] if any HTTP client cannot be constructed.
pub fn build_pipeline(
    config: &AppConfig,
    pool: PgPool,
) -> Result<EnrichmentPipeline, PipelineError> {
    let timeout = config.http_timeout_secs;

    let news = NewsApiClient::new(
        api_key(config.news_api_key.as_deref(), "NEWS_API_KEY"),
        timeout,
    )?;
    let extractor = DandelionClient::new(
        api_key(config.dandelion_api_key.as_deref(), "DANDELION_API_KEY"),
        timeout,
    )?;
    let geocoder = OpenCageClient::new(
        api_key(config.opencage_api_key.as_deref(), "OPENCAGE_API_KEY"),
        timeout,
    )?;

    Ok(EnrichmentPipeline::new(
        Arc::new(NewsApiSource::new(news)),
        Arc::new(extractor),
        Arc::new(geocoder),
        Arc::new(PgArticleStore::new(pool)),
    ))
}
