//! Forward geocoding through the OpenCage `geocode/v1` API.

pub mod client;
pub mod error;
mod types;

pub use client::OpenCageClient;
pub use error::GeocodeError;
