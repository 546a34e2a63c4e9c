//! Error types for habitlens-core

use thiserror::Error;

/// Main error type for the habitlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (bad encoding, broken quoting)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The habit log could not be loaded as a table
    #[error("failed to read habit log: {0}")]
    Load(String),
}

/// Result type alias for habitlens-core
pub type Result<T> = std::result::Result<T, Error>;
