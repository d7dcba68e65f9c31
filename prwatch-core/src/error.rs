//! Error types for prwatch

use thiserror::Error;

/// Result type alias for prwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for prwatch operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot source failed to produce data
    #[error("Failed to fetch pull request data: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether a polling tick that hit this error should be skipped rather
    /// than ending the run
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Json(_) | Error::Fetch(_))
    }
}
