// src/query.rs

//! Store query construction.
//!
//! Maps a validated [`CastQuery`] onto the expressions a document store
//! understands:
//!
//! - key condition `movieId = :m` on the cast table partition key
//! - at most one filter `begins_with(<attribute>, <placeholder>)`
//!
//! The filter is applied by the store after key retrieval, so it narrows the
//! returned items but not the scanned key range.

use std::collections::BTreeMap;

use crate::models::{CastQuery, NameFilter};

/// Partition key attribute of the cast table.
pub const CAST_PARTITION_KEY: &str = "movieId";

/// Primary key attribute of the movie table.
pub const MOVIE_PRIMARY_KEY: &str = "id";

/// Placeholder bound to the movie id in the key condition.
pub const MOVIE_ID_PLACEHOLDER: &str = ":m";

/// A value bound to an expression placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionValue {
    Number(i64),
    String(String),
}

/// Expressions for a single cast table query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryExpression {
    pub key_condition: String,
    pub filter: Option<String>,
    pub values: BTreeMap<&'static str, ExpressionValue>,
}

impl QueryExpression {
    /// Build the expressions for a cast query.
    pub fn for_query(query: &CastQuery) -> Self {
        let mut values = BTreeMap::new();
        values.insert(MOVIE_ID_PLACEHOLDER, ExpressionValue::Number(query.movie_id));

        let filter = query.name_filter.as_ref().map(|filter| {
            values.insert(
                filter.field.placeholder(),
                ExpressionValue::String(filter.prefix.clone()),
            );
            filter_expression(filter)
        });

        Self {
            key_condition: format!("{CAST_PARTITION_KEY} = {MOVIE_ID_PLACEHOLDER}"),
            filter,
            values,
        }
    }
}

fn filter_expression(filter: &NameFilter) -> String {
    format!(
        "begins_with({}, {})",
        filter.field.attribute(),
        filter.field.placeholder()
    )
}
