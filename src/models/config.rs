//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable holding the cast table name.
pub const CAST_TABLE_ENV: &str = "CAST_TABLE_NAME";
/// Environment variable holding the movie table name.
pub const MOVIE_TABLE_ENV: &str = "TABLE_NAME";
/// Environment variable holding the store region.
pub const REGION_ENV: &str = "REGION";

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Table names in the document store
    #[serde(default)]
    pub tables: TableConfig,

    /// Store region; the SDK default chain is used when unset
    #[serde(default)]
    pub region: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Build configuration from the Lambda environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(table) = non_blank(CAST_TABLE_ENV) {
            config.tables.cast_table = table;
        }
        if let Some(table) = non_blank(MOVIE_TABLE_ENV) {
            config.tables.movie_table = table;
        }
        config.region = non_blank(REGION_ENV);

        config
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.tables.cast_table.trim().is_empty() {
            return Err(AppError::validation("tables.cast_table is empty"));
        }
        if self.tables.movie_table.trim().is_empty() {
            return Err(AppError::validation("tables.movie_table is empty"));
        }
        if matches!(&self.region, Some(region) if region.trim().is_empty()) {
            return Err(AppError::validation("region is set but empty"));
        }
        Ok(())
    }
}

/// Names of the two tables the handler reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Cast table, partitioned by `movieId`
    #[serde(default = "defaults::cast_table")]
    pub cast_table: String,

    /// Movie table, keyed by `id`
    #[serde(default = "defaults::movie_table")]
    pub movie_table: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            cast_table: defaults::cast_table(),
            movie_table: defaults::movie_table(),
        }
    }
}

mod defaults {
    pub fn cast_table() -> String {
        "MovieCast".into()
    }
    pub fn movie_table() -> String {
        "Movies".into()
    }
}
