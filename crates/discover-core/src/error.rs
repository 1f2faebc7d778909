//! Error types for Discover

use thiserror::Error;

/// Errors returned by the saved query persistence service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Persistence request failed: {0}")]
    RequestFailed(String),

    #[error("Saved query not found: {0}")]
    NotFound(String),
}

/// Result type alias for persistence operations
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// A pagination link descriptor that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkParseError {
    #[error("Unterminated {0} in link entry")]
    Unterminated(&'static str),

    #[error("Link entry has no rel attribute: {0:?}")]
    MissingRel(String),

    #[error("Malformed link attribute: {0:?}")]
    MalformedAttribute(String),

    #[error("Invalid results value: {0:?}")]
    InvalidResults(String),
}
