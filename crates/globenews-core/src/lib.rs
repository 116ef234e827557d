pub mod app_config;
pub mod articles;
pub mod config;
pub mod logging;
pub mod slug;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use articles::{Article, ArticleSource, EnrichedArticle, LatLong};
pub use config::{load_app_config, load_app_config_from_env};
pub use logging::LoggingError;
pub use slug::slugify;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
