//! Client for the Dandelion `datatxt/nex` entity-extraction API.
//!
//! Annotates the page behind an article URL and keeps the annotations typed
//! as places, best candidate first.

pub mod client;
pub mod error;
pub mod types;

pub use client::{filter_places, DandelionClient, PLACE_TYPE};
pub use error::DandelionError;
pub use types::Annotation;
