//! Unified error types for chatweave.
//!
//! Only a handful of things are real errors here. A transcript directory that
//! lacks its transcript file, a configuration that cannot be used, and plain
//! I/O failures stop processing. Everything else (missing attachment files,
//! lines that look almost like headers, collapsed attachment slots) is recorded
//! as state on the produced [`EnrichedMessage`](crate::EnrichedMessage) instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatweave operations.
///
/// # Example
///
/// ```rust
/// use chatweave::error::Result;
/// use chatweave::EnrichedMessage;
///
/// fn my_function() -> Result<Vec<EnrichedMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatweaveError>;

/// The error type for all chatweave operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatweaveError {
    /// An I/O error occurred while reading a transcript or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A candidate directory does not contain the expected transcript file.
    ///
    /// Fatal for that directory only. Other transcripts in the same run are
    /// unaffected.
    #[error("No {file_name} in {}", dir.display())]
    TranscriptNotFound {
        /// The directory that was searched
        dir: PathBuf,
        /// The transcript file name that was expected
        file_name: String,
    },

    /// The run parameters cannot be used.
    ///
    /// Covers unreadable base directories, zero-sized context windows and
    /// marker vocabularies that do not compile into a pattern.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// The requested output format is unknown.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatweaveError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatweaveError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatweaveError {
    /// Creates a transcript-not-found error.
    pub fn transcript_not_found(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        ChatweaveError::TranscriptNotFound {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatweaveError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatweaveError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatweaveError::Io(_))
    }

    /// Returns `true` if a transcript file was missing.
    pub fn is_transcript_not_found(&self) -> bool {
        matches!(self, ChatweaveError::TranscriptNotFound { .. })
    }

    /// Returns `true` if the configuration was rejected.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatweaveError::InvalidConfig { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatweaveError::InvalidFormat { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatweaveError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_transcript_not_found_display() {
        let err = ChatweaveError::transcript_not_found("/exports/Alice", "messages.txt");
        let display = err.to_string();
        assert!(display.contains("messages.txt"));
        assert!(display.contains("/exports/Alice"));
        assert!(err.is_transcript_not_found());
        assert!(!err.is_invalid_config());
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ChatweaveError::invalid_config("context window must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: context window must not be empty"
        );
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_invalid_format_display() {
        let err = ChatweaveError::invalid_format("output", "Unknown file extension: '.xml'");
        let display = err.to_string();
        assert!(display.contains("Invalid output format"));
        assert!(display.contains(".xml"));
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_utf8_error_conversion() {
        let invalid = vec![0xff, 0xfe];
        let utf8_err = String::from_utf8(invalid).unwrap_err();
        let err = ChatweaveError::from(utf8_err);
        assert!(err.to_string().contains("output conversion"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ChatweaveError::from(json_err);
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatweaveError>();
    }
}
