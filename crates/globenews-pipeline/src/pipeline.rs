use std::sync::Arc;

use globenews_core::{slugify, Article, EnrichedArticle};
use globenews_db::InsertOutcome;
use globenews_opencage::GeocodeError;

use crate::report::{ArticleOutcome, RunReport};
use crate::traits::{ArticleStore, Geocoder, NewsSource, PlaceExtractor};

/// Fetch, dedupe, locate and store news articles.
///
/// One article's failure never aborts the batch: every outcome is logged,
/// tallied in the [`RunReport`] and processing moves on.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    source: Arc<dyn NewsSource>,
    extractor: Arc<dyn PlaceExtractor>,
    geocoder: Arc<dyn Geocoder>,
    store: Arc<dyn ArticleStore>,
}

impl EnrichmentPipeline {
    #[must_use]
    pub fn new(
        source: Arc<dyn NewsSource>,
        extractor: Arc<dyn PlaceExtractor>,
        geocoder: Arc<dyn Geocoder>,
        store: Arc<dyn ArticleStore>,
    ) -> Self {
        Self {
            source,
            extractor,
            geocoder,
            store,
        }
    }

    /// Store handle shared with the HTTP layer.
    #[must_use]
    pub fn store(&self) -> Arc<dyn ArticleStore> {
        Arc::clone(&self.store)
    }

    /// One full extraction run against a freshly sampled source selector.
    pub async fn run(&self) -> RunReport {
        let selector = self.source.source_selector().await;
        if selector.is_empty() {
            tracing::warn!("no source selector; fetching without one");
        }
        let articles = self.source.fetch_articles(&selector).await;
        self.process_articles(articles).await
    }

    /// Enrich and store an already-fetched batch.
    pub async fn process_articles(&self, articles: Vec<Article>) -> RunReport {
        let mut report = RunReport {
            fetched: articles.len(),
            ..RunReport::default()
        };
        tracing::info!(fetched = report.fetched, "processing articles");

        for article in articles {
            let outcome = self.process_article(article).await;
            report.record(outcome);
        }

        tracing::info!(
            fetched = report.fetched,
            inserted = report.inserted,
            duplicates = report.duplicates,
            invalid_title = report.invalid_title,
            lookup_failed = report.lookup_failed,
            no_place = report.no_place,
            geocode_failed = report.geocode_failed,
            insert_failed = report.insert_failed,
            "extraction run complete"
        );
        report
    }

    async fn process_article(&self, article: Article) -> ArticleOutcome {
        let slug = slugify(&article.title);
        if slug.is_empty() {
            tracing::warn!(title = %article.title, "skipping article: title yields an empty slug");
            return ArticleOutcome::InvalidTitle;
        }

        match self.store.exists(&slug).await {
            Ok(true) => {
                tracing::warn!(%slug, "skipping article: already exists");
                return ArticleOutcome::Duplicate;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(%slug, error = %e, "skipping article: existence check failed");
                return ArticleOutcome::LookupFailed;
            }
        }

        let places = match self.extractor.extract_places(&article).await {
            Ok(places) => places,
            Err(e) => {
                tracing::error!(%slug, url = %article.url, error = %e, "entity extraction failed");
                Vec::new()
            }
        };
        let Some(place) = places.into_iter().next() else {
            tracing::warn!(%slug, "skipping article: no place found");
            return ArticleOutcome::NoPlace;
        };
        tracing::debug!(%slug, place = %place.label, confidence = place.confidence, "top place");

        let latlong = match self.geocoder.resolve(&place.label).await {
            Ok(Some(latlong)) => latlong,
            Ok(None) => {
                tracing::warn!(%slug, place = %place.label, "skipping article: no coordinates");
                return ArticleOutcome::GeocodeFailed;
            }
            Err(e @ GeocodeError::RateLimited { .. }) => {
                tracing::error!(%slug, place = %place.label, error = %e, "geocoder rate limit hit");
                return ArticleOutcome::GeocodeFailed;
            }
            Err(e) => {
                tracing::error!(%slug, place = %place.label, error = %e, "geocoding failed");
                return ArticleOutcome::GeocodeFailed;
            }
        };

        let enriched = EnrichedArticle::new(article, slug, latlong);
        match self.store.insert(&enriched).await {
            Ok(InsertOutcome::Inserted) => {
                tracing::info!(slug = %enriched.slug, place = %place.label, "inserted article");
                ArticleOutcome::Inserted
            }
            Ok(InsertOutcome::Duplicate) => {
                tracing::warn!(slug = %enriched.slug, "skipping article: inserted concurrently");
                ArticleOutcome::Duplicate
            }
            Err(e) => {
                tracing::error!(slug = %enriched.slug, error = %e, "failed to insert article");
                ArticleOutcome::InsertFailed
            }
        }
    }
}
