//! Error types for hypotest operations.
//!
//! Two kinds of failure abort an operation: validation errors (the caller's
//! data violates a test's preconditions) and runtime failures (a statistics
//! kernel or the table loader could not produce a result). Non-fatal
//! conditions never appear here; they travel through [`crate::advisory`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hypotest operations.
pub type Result<T> = std::result::Result<T, HypothesisError>;

/// Main error type for hypotest operations.
///
/// # Examples
///
/// ```
/// use hypotest::error::HypothesisError;
///
/// let err = HypothesisError::validation("Samples are of different sizes");
/// assert!(err.is_validation());
/// assert!(err.to_string().contains("different sizes"));
/// ```
#[derive(Error, Debug)]
pub enum HypothesisError {
    /// Caller-supplied data violates a precondition of the requested test.
    #[error("Validation failed: {message}")]
    Validation {
        /// Validation failure message
        message: String,
    },

    /// A kernel needs more observations than were supplied.
    #[error("Insufficient data in {context}: need at least {required}, got {got}")]
    InsufficientData {
        /// Minimum number of observations
        required: usize,
        /// Observations supplied
        got: usize,
        /// Kernel name
        context: String,
    },

    /// Paired inputs have different lengths.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// The statistic is undefined for this input (zero variance, all ties).
    #[error("Degenerate input in {context}: {reason}")]
    Degenerate {
        /// Kernel name
        context: String,
        /// Why the statistic is undefined
        reason: String,
    },

    /// Contingency table has an unsupported shape or empty margins.
    #[error("Invalid contingency table: {message}")]
    InvalidTable {
        /// Error description
        message: String,
    },

    /// Loading a table from disk failed.
    #[error("Error loading {}: {message}", path.display())]
    Load {
        /// File that failed to load
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Malformed engine configuration.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error description
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HypothesisError {
    /// Builds a [`HypothesisError::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Builds a [`HypothesisError::Degenerate`] for the named kernel.
    pub fn degenerate(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Degenerate {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`HypothesisError::Load`] wrapping an underlying failure.
    pub fn load(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// True for precondition violations raised before any statistic is reported.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<serde_json::Error> for HypothesisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
