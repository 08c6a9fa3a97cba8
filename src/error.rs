// src/error.rs

//! Unified error handling for the cast API.

use std::fmt;

use serde_json::{Value, json};
use thiserror::Error;

/// Result type alias for cast API operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request carried no query string parameters at all
    #[error("Missing query parameters")]
    MissingParameters,

    /// Query string parameters were present but `movieId` was not
    #[error("Missing movie Id parameter")]
    MissingMovieId,

    /// `movieId` was present but is not an integer
    #[error("Invalid movie Id parameter")]
    InvalidMovieId(String),

    /// The document store rejected or failed a request
    #[error("Store error: {0}")]
    Store(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a store error from any displayable cause.
    pub fn store(message: impl fmt::Display) -> Self {
        Self::Store(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a data validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error was raised by request validation before any store access.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameters | Self::MissingMovieId | Self::InvalidMovieId(_)
        )
    }

    /// Short machine-readable name of the error kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingParameters => "MissingParameters",
            Self::MissingMovieId => "MissingMovieId",
            Self::InvalidMovieId(_) => "InvalidMovieId",
            Self::Store(_) => "StoreFailure",
            Self::Io(_) => "IoError",
            Self::Json(_) => "JsonError",
            Self::Toml(_) => "TomlError",
            Self::Config(_) => "ConfigError",
            Self::Validation(_) => "ValidationError",
        }
    }

    /// HTTP status reported for this error.
    ///
    /// Request validation failures are reported as 500 alongside store
    /// failures; clients depend on that status.
    pub fn status_code(&self) -> u16 {
        500
    }

    /// JSON body reported for this error.
    ///
    /// Validation errors carry a `message`, everything else is wrapped in an
    /// `error` object.
    pub fn to_body(&self) -> Value {
        if self.is_request_error() {
            json!({ "message": self.to_string() })
        } else {
            json!({
                "error": {
                    "name": self.name(),
                    "message": self.to_string(),
                }
            })
        }
    }
}
