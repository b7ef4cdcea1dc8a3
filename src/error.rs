//! Error types for the socialtok library.
//!
//! All errors are represented by the [`SocialtokError`] enum. Configuration
//! problems surface when a tokenizer is built, never in the middle of
//! tokenizing a document.
//!
//! # Examples
//!
//! ```
//! use socialtok::error::{Result, SocialtokError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SocialtokError::configuration("ngrams must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for socialtok operations.
#[derive(Error, Debug)]
pub enum SocialtokError {
    /// I/O errors (dictionary files, config files, CLI input)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or conflicting tokenizer configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// URL resolution failures. Recovered inside the entity replacer.
    #[error("Network resolution error: {0}")]
    Network(String),

    /// Input that is not valid text
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Batch execution errors
    #[error("Batch error: {0}")]
    Batch(String),

    /// Operation cancelled
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SocialtokError.
pub type Result<T> = std::result::Result<T, SocialtokError>;

impl SocialtokError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Configuration(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Analysis(msg.into())
    }

    /// Create a new network resolution error.
    pub fn network<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Network(msg.into())
    }

    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Encoding(msg.into())
    }

    /// Create a new batch error.
    pub fn batch<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Batch(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Cancelled(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SocialtokError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether this error came from a failed URL resolution.
    pub fn is_network(&self) -> bool {
        matches!(self, SocialtokError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SocialtokError::configuration("bad pattern");
        assert_eq!(error.to_string(), "Configuration error: bad pattern");

        let error = SocialtokError::network("timed out");
        assert_eq!(error.to_string(), "Network resolution error: timed out");
        assert!(error.is_network());

        let error = SocialtokError::encoding("invalid utf-8");
        assert_eq!(error.to_string(), "Encoding error: invalid utf-8");
        assert!(!error.is_network());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SocialtokError::from(io_error);

        match error {
            SocialtokError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
