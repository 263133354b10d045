//! Error types for the MovieDeck plugin.
//!
//! This module defines the centralized error type [`MovieDeckError`] and a type alias
//! [`Result`] used throughout the plugin. Variants follow the plugin's failure taxonomy:
//! search failures are shown to the user, persistence failures are only logged, and
//! malformed records are skipped without aborting the surrounding batch.

use thiserror::Error;

/// The main error type for MovieDeck operations.
///
/// # Examples
///
/// ```
/// use moviedeck::MovieDeckError;
///
/// fn lookup() -> Result<(), MovieDeckError> {
///     Err(MovieDeckError::Service("server answered with status 503".to_string()))
/// }
///
/// assert!(lookup().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MovieDeckError {
    /// The remote search endpoint could not be reached, answered with a non-success
    /// status, or returned a payload without the expected result collection.
    ///
    /// Surfaced inline in the results panel. Never retried automatically.
    #[error("Search service error: {0}")]
    Service(String),

    /// Reading or writing the local key-value store failed.
    ///
    /// Logged only. The favorites list stays usable in memory for the session.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A single movie record lacks a required field (identifier or title).
    ///
    /// Result entries carrying this error are skipped; the rest of the batch renders.
    #[error("Malformed movie record: {0}")]
    MalformedRecord(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    ///
    /// Fatal to bootstrap: the plugin shows a failure screen instead of the UI.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for MovieDeck operations.
pub type Result<T> = std::result::Result<T, MovieDeckError>;
