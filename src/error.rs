//! Error types for the Penmark library.
//!
//! All fallible operations return [`PenmarkError`]. The variants mirror the
//! three failure classes a caller has to tell apart (bad training input, a
//! facade with no model, an unreadable persisted model) plus the plumbing
//! errors that bubble up from I/O and JSON configuration.
//!
//! # Examples
//!
//! ```
//! use penmark::error::{ErrorKind, PenmarkError, Result};
//!
//! fn check_labels(count: usize) -> Result<()> {
//!     if count < 2 {
//!         return Err(PenmarkError::configuration(format!(
//!             "at least two labels are required, got {count}"
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_labels(1).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Configuration);
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

/// The main error type for Penmark operations.
#[derive(Error, Debug)]
pub enum PenmarkError {
    /// Training preconditions were violated (empty corpus, single label, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Inference or save attempted without a trained or loaded model.
    #[error("State error: {0}")]
    State(String),

    /// A persisted model could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deferred document text could not be obtained.
    #[error("Source error: {0}")]
    Source(String),

    /// A configured resource limit was exceeded.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// I/O errors from caller-supplied sinks and sources.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON configuration errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with PenmarkError.
pub type Result<T> = std::result::Result<T, PenmarkError>;

/// Coarse classification of a [`PenmarkError`], for callers that report the
/// kind separately from the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    State,
    Serialization,
    Source,
    ResourceExhausted,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::State => "state",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Source => "source",
            ErrorKind::ResourceExhausted => "resource_exhausted",
            ErrorKind::Io => "io",
        };
        f.write_str(name)
    }
}

impl PenmarkError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        PenmarkError::Configuration(msg.into())
    }

    /// Create a new state error.
    pub fn state<S: Into<String>>(msg: S) -> Self {
        PenmarkError::State(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        PenmarkError::Serialization(msg.into())
    }

    /// Create a new source error.
    pub fn source_text<S: Into<String>>(msg: S) -> Self {
        PenmarkError::Source(msg.into())
    }

    /// Create a new resource exhausted error.
    pub fn resource_exhausted<S: Into<String>>(msg: S) -> Self {
        PenmarkError::ResourceExhausted(msg.into())
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PenmarkError::Configuration(_) | PenmarkError::Json(_) => ErrorKind::Configuration,
            PenmarkError::State(_) => ErrorKind::State,
            PenmarkError::Serialization(_) => ErrorKind::Serialization,
            PenmarkError::Source(_) => ErrorKind::Source,
            PenmarkError::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
            PenmarkError::Io(_) => ErrorKind::Io,
        }
    }
}
