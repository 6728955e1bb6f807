//! Error types for ToolMint.
//!
//! Quality rejections are deliberately NOT represented here: a record that
//! fails validation is a skip-and-continue outcome carried as a value (see
//! the engine's verdict type), never an error. This module covers the
//! failures that genuinely abort an operation: I/O, malformed persisted
//! documents, and bad configuration.
//!
//! # Examples
//!
//! ```
//! use toolmint_core::{Error, Result};
//!
//! fn check_output_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "output path cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_output_name("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for ToolMint operations.
///
/// All fallible operations across the workspace crates use this type,
/// providing consistent error handling and classification.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed.
    ///
    /// Occurs when reading dataset files or writing tool documents and
    /// exports.
    #[error("File I/O error for {path:?}")]
    IoError {
        /// The path that caused the error.
        path: std::path::PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when a persisted tool document or export payload cannot be
    /// converted to or from JSON.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure.
        message: String,
        /// Underlying serde error, if any.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration error.
    ///
    /// Raised when minting options or CLI configuration is invalid or
    /// contradictory.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem.
        message: String,
    },
}

impl Error {
    /// Returns true if this is an I/O error.
    #[inline]
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Returns true if this is a serialization error.
    #[inline]
    #[must_use]
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }

    /// Returns true if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }
}

/// Result type for ToolMint operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = Error::ConfigError {
            message: "bad".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_io_error());
        assert!(!err.is_serialization_error());
    }

    #[test]
    fn test_io_error_display() {
        let err = Error::IoError {
            path: std::path::PathBuf::from("/tmp/data.jsonl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.is_io_error());
        assert!(format!("{err}").contains("data.jsonl"));
    }

    #[test]
    fn test_serialization_error_without_source() {
        let err = Error::SerializationError {
            message: "unexpected shape".to_string(),
            source: None,
        };
        assert!(err.is_serialization_error());
    }
}
