//! Article records as fetched from the news source and as persisted after
//! enrichment.
//!
//! Field names serialize in the news source's camelCase shape (`urlToImage`,
//! `publishedAt`) because the globe client consumes the stored documents
//! verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publisher of an article. `id` is absent for sources outside the
/// aggregator's curated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// An article as returned by the news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong {
    pub lat: f64,
    pub long: f64,
}

/// An article with its dedup slug and resolved location attached.
///
/// Only constructed once a place was found and geocoded, so `latlong` is
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub slug: String,
    pub latlong: LatLong,
}

impl EnrichedArticle {
    #[must_use]
    pub fn new(article: Article, slug: String, latlong: LatLong) -> Self {
        Self {
            article,
            slug,
            latlong,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "source": { "id": "bbc-news", "name": "BBC News" },
            "author": null,
            "title": "Bitcoin Hits New High",
            "description": "Markets rally.",
            "url": "https://example.com/bitcoin",
            "urlToImage": "https://example.com/bitcoin.jpg",
            "publishedAt": "2019-03-10T12:30:00Z",
            "content": null
        })
    }

    #[test]
    fn article_deserializes_news_source_shape() {
        let article: Article = serde_json::from_value(sample_json()).expect("deserialize");
        assert_eq!(article.source.id.as_deref(), Some("bbc-news"));
        assert_eq!(article.source.name, "BBC News");
        assert!(article.author.is_none());
        assert_eq!(article.title, "Bitcoin Hits New High");
        assert_eq!(
            article.url_to_image.as_deref(),
            Some("https://example.com/bitcoin.jpg")
        );
        assert_eq!(article.published_at.to_rfc3339(), "2019-03-10T12:30:00+00:00");
    }

    #[test]
    fn article_tolerates_missing_optional_fields() {
        let json = serde_json::json!({
            "source": { "name": "Local Paper" },
            "title": "Headline",
            "url": "https://example.com/h",
            "publishedAt": "2019-03-10T12:30:00.123Z"
        });
        let article: Article = serde_json::from_value(json).expect("deserialize");
        assert!(article.source.id.is_none());
        assert!(article.description.is_none());
        assert!(article.content.is_none());
    }

    #[test]
    fn enriched_article_serializes_flat_with_latlong() {
        let article: Article = serde_json::from_value(sample_json()).expect("deserialize");
        let enriched = EnrichedArticle::new(
            article,
            "bitcoin-hits-new-high".to_string(),
            LatLong {
                lat: 48.85,
                long: 2.35,
            },
        );
        let json = serde_json::to_value(&enriched).expect("serialize");
        assert_eq!(json["slug"], "bitcoin-hits-new-high");
        assert_eq!(json["title"], "Bitcoin Hits New High");
        assert_eq!(json["source"]["name"], "BBC News");
        assert_eq!(json["urlToImage"], "https://example.com/bitcoin.jpg");
        assert!((json["latlong"]["lat"].as_f64().unwrap() - 48.85).abs() < f64::EPSILON);
        assert!((json["latlong"]["long"].as_f64().unwrap() - 2.35).abs() < f64::EPSILON);
    }
}
