//! Article enrichment pipeline.
//!
//! Pulls a page of articles from the news source, drops the ones already
//! stored, finds the most confident place each article mentions, geocodes it
//! and stores the result. Every external dependency sits behind a trait in
//! [`traits`] so the pipeline can run against fakes.

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod traits;

pub use adapters::{build_pipeline, NewsApiSource, PgArticleStore};
pub use error::PipelineError;
pub use pipeline::EnrichmentPipeline;
pub use report::{ArticleOutcome, RunReport};
pub use traits::{ArticleStore, Geocoder, NewsSource, PlaceExtractor};
