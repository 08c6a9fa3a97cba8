//! Typed request parameters.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::Item;

/// Raw query string parameters as delivered by the HTTP layer.
pub type QueryParams = HashMap<String, String>;

/// Cast attribute a prefix filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    RoleName,
    ActorName,
}

impl NameField {
    /// Attribute name in the cast table (also the query string key).
    pub fn attribute(self) -> &'static str {
        match self {
            NameField::RoleName => "roleName",
            NameField::ActorName => "actorName",
        }
    }

    /// Expression placeholder bound to the prefix value.
    pub fn placeholder(self) -> &'static str {
        match self {
            NameField::RoleName => ":r",
            NameField::ActorName => ":a",
        }
    }
}

/// Case-sensitive prefix match on one cast attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    pub field: NameField,
    pub prefix: String,
}

impl NameFilter {
    pub fn new(field: NameField, prefix: impl Into<String>) -> Self {
        Self {
            field,
            prefix: prefix.into(),
        }
    }

    /// Whether an item passes the filter.
    ///
    /// A missing or non-string attribute never matches.
    pub fn matches(&self, item: &Item) -> bool {
        item.get(self.field.attribute())
            .and_then(|value| value.as_str())
            .is_some_and(|value| value.starts_with(&self.prefix))
    }
}

/// A validated cast lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastQuery {
    /// Partition key of the cast table and primary key of the movie table
    pub movie_id: i64,

    /// Whether movie facts were requested (`facts=true`)
    pub include_facts: bool,

    /// Optional prefix narrowing; `roleName` takes precedence over `actorName`
    pub name_filter: Option<NameFilter>,
}

impl CastQuery {
    pub fn new(movie_id: i64) -> Self {
        Self {
            movie_id,
            include_facts: false,
            name_filter: None,
        }
    }

    pub fn with_facts(mut self, include_facts: bool) -> Self {
        self.include_facts = include_facts;
        self
    }

    pub fn with_filter(mut self, filter: NameFilter) -> Self {
        self.name_filter = Some(filter);
        self
    }

    /// Validate raw query string parameters.
    ///
    /// Fails before any store access when parameters are absent, when
    /// `movieId` is absent or empty, or when it is not an integer.
    pub fn from_params(params: Option<&QueryParams>) -> Result<Self> {
        let params = params.ok_or(AppError::MissingParameters)?;

        let raw_id = params
            .get("movieId")
            .filter(|value| !value.is_empty())
            .ok_or(AppError::MissingMovieId)?;
        let movie_id = raw_id
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::InvalidMovieId(raw_id.clone()))?;

        let include_facts = params.get("facts").is_some_and(|value| value == "true");

        // Presence of the key decides, not its value.
        let name_filter = [NameField::RoleName, NameField::ActorName]
            .into_iter()
            .find_map(|field| {
                params
                    .get(field.attribute())
                    .map(|prefix| NameFilter::new(field, prefix.as_str()))
            });

        Ok(Self {
            movie_id,
            include_facts,
            name_filter,
        })
    }
}
