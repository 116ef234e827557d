//! Postgres-backed article store: pool setup, migrations and the queries
//! the pipeline and HTTP layer run against the `articles` table.

use std::time::Duration;

use globenews_core::AppConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

pub mod articles;

pub use articles::{
    article_exists, count_articles, insert_article, sample_articles, ArticleRow, InsertOutcome,
};

// Relative to this crate's manifest: <workspace-root>/migrations/
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connection pool sizing.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 10,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] MigrateError),
}

/// Opens a pool against `database_url`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the first connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Applies pending migrations and returns how many ran.
///
/// # Errors
///
/// Returns [`MigrateError`] if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, MigrateError> {
    let before = applied_migrations(pool).await;
    MIGRATOR.run(pool).await?;
    let after = applied_migrations(pool).await;
    Ok(after.saturating_sub(before))
}

/// Successful rows in `_sqlx_migrations`; zero before the table exists.
async fn applied_migrations(pool: &PgPool) -> usize {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await
            .unwrap_or(0);
    usize::try_from(count).unwrap_or(0)
}

/// Round-trips `SELECT 1` to prove the database answers.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn health_check(pool: &PgPool) -> Result<(), DbError> {
    let _: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_is_small() {
        let config = PoolConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout_secs, 10);
    }

    #[test]
    fn migrator_includes_articles_table() {
        assert!(MIGRATOR
            .iter()
            .any(|m| m.description.contains("create articles")));
    }
}
