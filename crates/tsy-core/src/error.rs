//! Error types for core treasury types.
//!
//! Deal and configuration construction is the only hard, propagating
//! failure boundary in the engine: a malformed deal must never enter a
//! portfolio. Everything downstream of construction degrades softly.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur constructing core treasury types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A field failed validation during construction.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// The name of the offending field.
        field: String,
        /// The reason validation failed.
        reason: String,
    },

    /// A required field was missing during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Dates are inconsistent with each other.
    #[error("Inconsistent dates: {reason}")]
    InconsistentDates {
        /// The reason the dates are inconsistent.
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid field error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an inconsistent dates error.
    #[must_use]
    pub fn inconsistent_dates(reason: impl Into<String>) -> Self {
        Self::InconsistentDates {
            reason: reason.into(),
        }
    }
}
