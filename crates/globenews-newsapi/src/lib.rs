//! Client for the NewsAPI v2 REST API.
//!
//! Lists publisher sources, picks a random subset of them, and fetches the
//! latest page of articles for that subset or for a free-text query.

pub mod client;
pub mod error;
pub mod sources;
pub mod types;

pub use client::{NewsApiClient, PAGE_SIZE};
pub use error::NewsApiError;
pub use sources::{encode_sources, pick_sources, NUM_SOURCES};
pub use types::SourceInfo;
