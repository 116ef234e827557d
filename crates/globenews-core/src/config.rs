use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// `HashMap` without `set_var`/`remove_var`.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let database_url = match optional("DATABASE_URL") {
        Some(url) => url,
        None => {
            let username = optional("DB_USERNAME")
                .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
            let password = optional("DB_PW")
                .ok_or_else(|| ConfigError::MissingEnvVar("DB_PW".to_string()))?;
            let host = or_default("GLOBENEWS_DB_HOST", "localhost:5432");
            let name = or_default("GLOBENEWS_DB_NAME", "global_news");
            compose_database_url(&username, &password, &host, &name)
        }
    };

    let env = parse_environment(&or_default("GLOBENEWS_ENV", "development"))?;

    let bind_addr = or_default("GLOBENEWS_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("GLOBENEWS_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("GLOBENEWS_LOG_LEVEL", "info");
    let log_file = PathBuf::from(or_default("GLOBENEWS_LOG_FILE", "article-extraction.log"));

    let db_max_connections = parse_u32("GLOBENEWS_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("GLOBENEWS_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("GLOBENEWS_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let http_timeout_secs = parse_u64("GLOBENEWS_HTTP_TIMEOUT_SECS", "30")?;
    let extract_interval_mins = parse_u64("GLOBENEWS_EXTRACT_INTERVAL_MINS", "15")?;
    if extract_interval_mins == 0 {
        return Err(invalid(
            "GLOBENEWS_EXTRACT_INTERVAL_MINS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        log_file,
        news_api_key: optional("NEWS_API_KEY"),
        opencage_api_key: optional("OPENCAGE_API_KEY"),
        dandelion_api_key: optional("DANDELION_API_KEY"),
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        http_timeout_secs,
        extract_interval_mins,
    })
}

fn compose_database_url(username: &str, password: &str, host: &str, name: &str) -> String {
    format!(
        "postgres://{}:{}@{host}/{name}",
        utf8_percent_encode(username, NON_ALPHANUMERIC),
        utf8_percent_encode(password, NON_ALPHANUMERIC),
    )
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GLOBENEWS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
