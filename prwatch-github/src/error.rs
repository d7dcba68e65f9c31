//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// The pull request reference could not be used
    #[error("Invalid pull request reference '{0}'. Expected a number, branch, owner/repo#number, or a pull request URL")]
    InvalidTarget(String),
}

impl From<Error> for prwatch_core::Error {
    fn from(err: Error) -> Self {
        prwatch_core::Error::Other(err.to_string())
    }
}
