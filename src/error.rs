//! Custom error types for sitecheck

use crate::normalize::ValidationError;
use thiserror::Error;

/// Main error type for sitecheck operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("URL not found: {0}")]
    UrlNotFound(i64),

    #[error("Not initialized: run 'sitecheck init' first")]
    NotInitialized,

    #[error("Already initialized at {0} (use --force to overwrite)")]
    AlreadyInitialized(String),
}

/// Result type alias for sitecheck
pub type Result<T> = std::result::Result<T, Error>;
