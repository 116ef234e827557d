//! Process-wide `tracing` setup shared by the server and the CLI.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::AppConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("cannot open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("global subscriber already set: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global subscriber: human-readable events on stdout plus a
/// plain-text copy appended to `config.log_file`.
///
/// `RUST_LOG` overrides the configured level when set.
///
/// # Errors
///
/// Returns [`LoggingError`] if the level does not parse, the log file cannot
/// be opened, or a subscriber is already installed.
pub fn init(config: &AppConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    let file = open_log_file(config)?;
    build_subscriber(env_filter, file).try_init()?;
    Ok(())
}

fn open_log_file(config: &AppConfig) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
}

fn build_subscriber(
    env_filter: EnvFilter,
    file: File,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn scratch_log(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let pid = std::process::id();
        std::env::temp_dir().join(format!("globenews-{name}-{pid}-{nanos}.log"))
    }

    fn config_with_log(path: &PathBuf) -> AppConfig {
        let lookup = std::collections::HashMap::from([
            ("DATABASE_URL", "postgres://localhost/test".to_string()),
            ("GLOBENEWS_LOG_FILE", path.display().to_string()),
        ]);
        crate::config::build_app_config(|k| {
            lookup.get(k).cloned().ok_or(std::env::VarError::NotPresent)
        })
        .expect("config")
    }

    #[test]
    fn events_are_appended_to_log_file() {
        let path = scratch_log("append");
        std::fs::write(&path, "earlier run\n").expect("seed log");
        let config = config_with_log(&path);

        let file = open_log_file(&config).expect("open log");
        let subscriber = build_subscriber(EnvFilter::new("info"), file);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(slug = "paris-floods", "inserted article");
            tracing::debug!("filtered out");
        });

        let contents = std::fs::read_to_string(&path).expect("read log");
        std::fs::remove_file(&path).ok();

        assert!(contents.starts_with("earlier run\n"), "{contents}");
        assert!(contents.contains("inserted article"), "{contents}");
        assert!(contents.contains("slug=\"paris-floods\""), "{contents}");
        assert!(!contents.contains("filtered out"), "{contents}");
        assert!(!contents.contains('\u{1b}'), "file output has no ANSI codes");
    }

    #[test]
    fn missing_log_directory_is_an_error() {
        let path = scratch_log("missing").join("nested").join("x.log");
        let config = config_with_log(&path);
        assert!(open_log_file(&config).is_err());
    }
}
