//! Response payload.

use serde::Serialize;

use crate::models::{Item, MovieFacts};

/// Body of a successful cast lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastResponse {
    /// Cast items exactly as the store returned them; absent when the store
    /// response carried no items at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<Item>>,

    /// Movie facts, only when requested and the movie record exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<MovieFacts>,
}

impl CastResponse {
    pub fn new(cast: Option<Vec<Item>>) -> Self {
        Self { cast, movie: None }
    }

    /// Attach movie facts when a record was found.
    pub fn with_movie(mut self, movie: Option<MovieFacts>) -> Self {
        self.movie = movie;
        self
    }

    /// Number of cast items returned.
    pub fn cast_count(&self) -> usize {
        self.cast.as_ref().map_or(0, Vec::len)
    }
}
