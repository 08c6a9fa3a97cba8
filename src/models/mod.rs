// src/models/mod.rs

//! Domain models for the cast API.
//!
//! Cast and movie records are kept as opaque JSON objects so attributes the
//! handler does not know about pass through unchanged.

mod config;
mod movie;
mod request;
mod response;

// Re-export all public types
pub use config::{CAST_TABLE_ENV, Config, MOVIE_TABLE_ENV, REGION_ENV, TableConfig};
pub use movie::MovieFacts;
pub use request::{CastQuery, NameField, NameFilter, QueryParams};
pub use response::CastResponse;

/// A single record read from the document store.
pub type Item = serde_json::Map<String, serde_json::Value>;
