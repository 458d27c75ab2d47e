//! Error types for namecast.
//!
//! All errors are strongly typed using thiserror. The layering mirrors the
//! call path: validation errors surface misconfigured inputs, while index
//! and directory errors surface infrastructure failures that callers may
//! retry. A name that simply has no match is *not* an error — resolution
//! returns `Ok(None)` for that case.

use chrono::NaiveDate;
use thiserror::Error;

use crate::directory::DirectoryError;
use crate::index::IndexError;

/// Validation errors that occur during input validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("An as-of date is required to construct a resolver")]
    MissingAsOfDate,

    #[error("Invalid as-of date '{value}': expected YYYY-MM-DD")]
    InvalidAsOfDate {
        value: String,
    },

    #[error("Variant text cannot be empty")]
    EmptyVariantText,

    #[error("Invalid validity window: from ({from}) must not be after to ({to})")]
    InvalidValidityWindow {
        from: NaiveDate,
        to: NaiveDate,
    },
}

/// Top-level error type for namecast.
///
/// This enum encompasses all possible errors that can occur when
/// rebuilding the variant index or resolving a name.
#[derive(Debug, Error)]
pub enum NamecastError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl NamecastError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this error came from the search index or the
    /// upstream person directory.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Index(_) | Self::Directory(_))
    }

    /// Returns true if this error is retryable.
    ///
    /// Infrastructure errors (index backend, person directory) may clear
    /// on retry; validation and internal errors will not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) | Self::Internal { .. } => false,
            Self::Index(_) | Self::Directory(_) => true,
        }
    }
}

/// Result type alias for namecast operations.
pub type NamecastResult<T> = Result<T, NamecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_missing_date() {
        let err = ValidationError::MissingAsOfDate;
        let msg = format!("{err}");
        assert!(msg.contains("as-of date"));
    }

    #[test]
    fn test_validation_error_invalid_window() {
        let from = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
        let err = ValidationError::InvalidValidityWindow { from, to };
        let msg = format!("{err}");
        assert!(msg.contains("2020-05-01"));
        assert!(msg.contains("2019-05-01"));
    }

    #[test]
    fn test_namecast_error_from_validation() {
        let err: NamecastError = ValidationError::EmptyVariantText.into();
        assert!(err.is_validation());
        assert!(!err.is_retryable());
        assert!(!err.is_infrastructure());
    }

    #[test]
    fn test_namecast_error_from_index() {
        let err: NamecastError = IndexError::Unavailable("connection refused".to_string()).into();
        assert!(err.is_infrastructure());
        assert!(err.is_retryable());
        let msg = format!("{err}");
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_namecast_error_from_directory() {
        let err: NamecastError = DirectoryError::Backend("lost".to_string()).into();
        assert!(err.is_infrastructure());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_namecast_error_internal() {
        let err = NamecastError::internal("unexpected state");
        assert!(!err.is_retryable());
        let msg = format!("{err}");
        assert!(msg.contains("unexpected state"));
    }
}
