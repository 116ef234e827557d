//! Database operations for the `articles` table.
//!
//! Rows are never updated or deleted once written. The unique index on
//! `slug` backs the pipeline's existence check: an insert that loses a race
//! reports [`InsertOutcome::Duplicate`] instead of storing a second row.

use chrono::{DateTime, Utc};
use globenews_core::{Article, ArticleSource, EnrichedArticle, LatLong};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `articles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub slug: String,
    pub source_id: Option<String>,
    pub source_name: String,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<ArticleRow> for EnrichedArticle {
    fn from(row: ArticleRow) -> Self {
        EnrichedArticle {
            article: Article {
                source: ArticleSource {
                    id: row.source_id,
                    name: row.source_name,
                },
                author: row.author,
                title: row.title,
                description: row.description,
                url: row.url,
                url_to_image: row.url_to_image,
                published_at: row.published_at,
                content: row.content,
            },
            slug: row.slug,
            latlong: LatLong {
                lat: row.latitude,
                long: row.longitude,
            },
        }
    }
}

/// Result of [`insert_article`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A row with the same slug already exists; nothing was written.
    Duplicate,
}

const ARTICLE_COLUMNS: &str = "id, slug, source_id, source_name, author, title, description, \
     url, url_to_image, published_at, content, latitude, longitude, created_at";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Return `true` if an article with `slug` is already stored.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn article_exists(pool: &PgPool, slug: &str) -> Result<bool, DbError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM articles WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Insert one enriched article.
///
/// Returns [`InsertOutcome::Duplicate`] when the slug is already taken.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_article(
    pool: &PgPool,
    article: &EnrichedArticle,
) -> Result<InsertOutcome, DbError> {
    let inner = &article.article;
    let inserted: Option<i64> = sqlx::query_scalar(
        "INSERT INTO articles \
             (slug, source_id, source_name, author, title, description, url, \
              url_to_image, published_at, content, latitude, longitude) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (slug) DO NOTHING \
         RETURNING id",
    )
    .bind(&article.slug)
    .bind(inner.source.id.as_deref())
    .bind(&inner.source.name)
    .bind(inner.author.as_deref())
    .bind(&inner.title)
    .bind(inner.description.as_deref())
    .bind(&inner.url)
    .bind(inner.url_to_image.as_deref())
    .bind(inner.published_at)
    .bind(inner.content.as_deref())
    .bind(article.latlong.lat)
    .bind(article.latlong.long)
    .fetch_optional(pool)
    .await?;

    Ok(match inserted {
        Some(_) => InsertOutcome::Inserted,
        None => InsertOutcome::Duplicate,
    })
}

/// Return up to `n` uniformly random stored articles, in no particular order.
///
/// Returns every row when the table holds fewer than `n`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn sample_articles(pool: &PgPool, n: i64) -> Result<Vec<EnrichedArticle>, DbError> {
    let rows = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY RANDOM() LIMIT $1"
    ))
    .bind(n)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(EnrichedArticle::from).collect())
}

/// Count stored articles.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_articles(pool: &PgPool) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
