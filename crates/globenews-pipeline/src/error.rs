use thiserror::Error;

/// Failures while wiring the pipeline's clients together.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("news source client: {0}")]
    NewsApi(#[from] globenews_newsapi::NewsApiError),

    #[error("entity extractor client: {0}")]
    Dandelion(#[from] globenews_dandelion::DandelionError),

    #[error("geocoder client: {0}")]
    Geocode(#[from] globenews_opencage::GeocodeError),
}
