//! In-memory stand-ins for the pipeline seams, shared by route and
//! scheduler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use globenews_core::{Article, ArticleSource, EnrichedArticle, LatLong};
use globenews_dandelion::{Annotation, DandelionError};
use globenews_db::{DbError, InsertOutcome};
use globenews_opencage::GeocodeError;
use globenews_pipeline::{ArticleStore, EnrichmentPipeline, Geocoder, NewsSource, PlaceExtractor};

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

pub fn enriched(i: usize) -> EnrichedArticle {
    let title = format!("Story Number {i}");
    EnrichedArticle::new(
        Article {
            source: ArticleSource {
                id: Some("bbc-news".to_string()),
                name: "BBC News".to_string(),
            },
            author: None,
            title,
            description: None,
            url: format!("https://example.com/{i}"),
            url_to_image: None,
            published_at: Utc.with_ymd_and_hms(2019, 3, 10, 8, 15, 0).unwrap(),
            content: None,
        },
        format!("story-number-{i}"),
        LatLong {
            lat: 48.85,
            long: 2.35,
        },
    )
}

#[derive(Default)]
pub struct MemoryStore {
    articles: Mutex<Vec<EnrichedArticle>>,
    failing: bool,
    last_requested: Mutex<Option<i64>>,
}

impl MemoryStore {
    pub fn with_articles(count: usize) -> Self {
        Self {
            articles: Mutex::new((0..count).map(enriched).collect()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn last_requested(&self) -> Option<i64> {
        *self.last_requested.lock().unwrap()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn exists(&self, slug: &str) -> Result<bool, DbError> {
        Ok(self.articles.lock().unwrap().iter().any(|a| a.slug == slug))
    }

    async fn insert(&self, article: &EnrichedArticle) -> Result<InsertOutcome, DbError> {
        self.articles.lock().unwrap().push(article.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn sample(&self, n: i64) -> Result<Vec<EnrichedArticle>, DbError> {
        *self.last_requested.lock().unwrap() = Some(n);
        if self.failing {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        let take = usize::try_from(n).unwrap_or(0);
        Ok(self.articles.lock().unwrap().iter().take(take).cloned().collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        if self.failing {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// News source that counts runs and can be made slow to hold a run open.
#[derive(Default)]
pub struct CountingSource {
    pub runs: AtomicUsize,
    pub delay: Duration,
}

#[async_trait]
impl NewsSource for CountingSource {
    async fn source_selector(&self) -> String {
        self.runs.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        String::new()
    }

    async fn fetch_articles(&self, _selector: &str) -> Vec<Article> {
        Vec::new()
    }
}

struct NoPlaces;

#[async_trait]
impl PlaceExtractor for NoPlaces {
    async fn extract_places(&self, _article: &Article) -> Result<Vec<Annotation>, DandelionError> {
        Ok(Vec::new())
    }
}

struct NoCoordinates;

#[async_trait]
impl Geocoder for NoCoordinates {
    async fn resolve(&self, _place_name: &str) -> Result<Option<LatLong>, GeocodeError> {
        Ok(None)
    }
}

pub fn counting_pipeline(source: Arc<CountingSource>) -> EnrichmentPipeline {
    EnrichmentPipeline::new(
        source,
        Arc::new(NoPlaces),
        Arc::new(NoCoordinates),
        Arc::new(MemoryStore::default()),
    )
}
