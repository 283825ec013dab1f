//! Error types for Oppsum.

use thiserror::Error;

/// Library-level error type for Oppsum operations.
///
/// One variant per pipeline stage so failures stay attributable, but the
/// policy is uniform: fail fast and surface the message, no retries.
#[derive(Error, Debug)]
pub enum OppsumError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Catalog authentication failed: {0}")]
    Auth(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Summarization failed: {0}")]
    Summarize(String),

    #[error("Narration failed: {0}")]
    Narrate(String),

    #[error("Thumbnail generation failed: {0}")]
    Illustrate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Oppsum operations.
pub type Result<T> = std::result::Result<T, OppsumError>;
