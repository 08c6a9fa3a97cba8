//! Local filesystem store implementation.
//!
//! Serves the cast and movie tables from JSON files for development and
//! testing. Production deployments should use `DynamoStore`.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml           # Table names (optional)
//! ├── {cast_table}.json     # Array of cast items
//! └── {movie_table}.json    # Array of movie items
//! ```
//!
//! Key conditions and prefix filters are evaluated in-process with the same
//! semantics the DynamoDB expressions have.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{CastQuery, Item, TableConfig};
use crate::query::{CAST_PARTITION_KEY, MOVIE_PRIMARY_KEY};
use crate::storage::CastStore;

/// Local filesystem store backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
    tables: TableConfig,
}

impl LocalStore {
    /// Create a new LocalStore rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, tables: TableConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            tables,
        }
    }

    /// Path of the JSON file backing a table.
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.root_dir.join(format!("{table}.json"))
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, table: &str) -> Result<Option<Vec<u8>>> {
        let path = self.table_path(table);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read all items of a table, returning None if the table file is missing.
    pub async fn scan(&self, table: &str) -> Result<Option<Vec<Item>>> {
        match self.read_bytes(table).await? {
            Some(bytes) => {
                let items: Vec<Item> = serde_json::from_slice(&bytes).map_err(|e| {
                    AppError::store(format!("table {table} is not a JSON array of items: {e}"))
                })?;
                Ok(Some(items))
            }
            None => Ok(None),
        }
    }
}

/// Whether an item's key attribute holds the given integer.
fn key_equals(item: &Item, attribute: &str, id: i64) -> bool {
    match item.get(attribute) {
        Some(Value::Number(n)) => n.as_i64() == Some(id),
        _ => false,
    }
}

#[async_trait]
impl CastStore for LocalStore {
    async fn query_cast(&self, query: &CastQuery) -> Result<Option<Vec<Item>>> {
        let table = &self.tables.cast_table;
        let Some(items) = self.scan(table).await? else {
            log::warn!("No table file found for {}", table);
            return Ok(None);
        };

        let scanned = items.len();
        let matched: Vec<Item> = items
            .into_iter()
            .filter(|item| key_equals(item, CAST_PARTITION_KEY, query.movie_id))
            .filter(|item| {
                query
                    .name_filter
                    .as_ref()
                    .is_none_or(|filter| filter.matches(item))
            })
            .collect();

        log::debug!(
            "Query {}: {} of {} items matched movieId={}",
            table,
            matched.len(),
            scanned,
            query.movie_id
        );
        Ok(Some(matched))
    }

    async fn get_movie(&self, movie_id: i64) -> Result<Option<Item>> {
        let table = &self.tables.movie_table;
        let Some(items) = self.scan(table).await? else {
            log::warn!("No table file found for {}", table);
            return Ok(None);
        };

        Ok(items
            .into_iter()
            .find(|item| key_equals(item, MOVIE_PRIMARY_KEY, movie_id)))
    }
}
