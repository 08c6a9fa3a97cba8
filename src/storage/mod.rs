//! Document store backends.
//!
//! The handler reads two tables:
//!
//! ```text
//! cast table   partition key movieId   Query, optional begins_with filter
//! movie table  primary key id          GetItem
//! ```
//!
//! `DynamoStore` talks to DynamoDB (feature `dynamo`). `LocalStore` reads the
//! same tables from JSON files for development and testing.

#[cfg(feature = "dynamo")]
pub mod dynamo;
pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CastQuery, Item};

// Re-export for convenience
#[cfg(feature = "dynamo")]
pub use dynamo::DynamoStore;
pub use local::LocalStore;

/// Read access to the cast and movie tables.
#[async_trait]
pub trait CastStore: Send + Sync {
    /// Query the cast table by movie id, narrowed by the query's name filter.
    ///
    /// Items come back in store order. `None` means the store response held
    /// no items field at all, which is distinct from an empty page.
    async fn query_cast(&self, query: &CastQuery) -> Result<Option<Vec<Item>>>;

    /// Point lookup of a movie record by primary key.
    async fn get_movie(&self, movie_id: i64) -> Result<Option<Item>>;
}
