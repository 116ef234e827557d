use async_trait::async_trait;
use globenews_core::{Article, EnrichedArticle, LatLong};
use globenews_dandelion::{Annotation, DandelionError};
use globenews_db::{DbError, InsertOutcome};
use globenews_opencage::GeocodeError;

/// Where raw articles come from.
///
/// Implementations log their own failures and degrade to empty values, so a
/// dead news feed makes for an empty run rather than an error.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Comma-joined ids of the sources to pull from on this run. Empty when
    /// the source list could not be fetched.
    async fn source_selector(&self) -> String;

    /// One page of articles for `selector`.
    async fn fetch_articles(&self, selector: &str) -> Vec<Article>;
}

/// Finds place entities in an article, best candidate first.
#[async_trait]
pub trait PlaceExtractor: Send + Sync {
    async fn extract_places(&self, article: &Article) -> Result<Vec<Annotation>, DandelionError>;
}

/// Turns a place name into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, place_name: &str) -> Result<Option<LatLong>, GeocodeError>;
}

/// Persistent collection of enriched articles keyed by slug.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn exists(&self, slug: &str) -> Result<bool, DbError>;

    async fn insert(&self, article: &EnrichedArticle) -> Result<InsertOutcome, DbError>;

    /// Up to `n` random articles.
    async fn sample(&self, n: i64) -> Result<Vec<EnrichedArticle>, DbError>;

    /// Confirms the backing store answers; `/health` reports the result.
    async fn ping(&self) -> Result<(), DbError>;
}
