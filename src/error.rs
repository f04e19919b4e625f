//! Error types for lazy sequence evaluation.
//!
//! This module provides the error types surfaced when a pipeline is pulled.
//! Construction of an [`Enumerator`](crate::lazy::Enumerator) itself never
//! fails: the accepted source shapes form a closed sum type, so the only
//! runtime check left is the deferred one: whether a producer closure
//! actually returned a sequence when it was finally invoked.

use std::fmt;

/// Represents an error when a pulled value turned out not to be a sequence.
///
/// This error is raised lazily, at pull time, never at construction:
///
/// - a producer closure returned a [`Leaf`](crate::sequence::Value::Leaf)
///   value where a sequence was required, or
/// - `transpose` encountered a scalar row, which has no columns to fold.
///
/// # Examples
///
/// ```rust
/// use lazyseq::error::NotSequenceError;
///
/// let error = NotSequenceError {
///     operation: "each",
///     subject: "producer return value",
/// };
/// assert_eq!(
///     format!("{}", error),
///     "Enumerator::each: producer return value is not a sequence"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotSequenceError {
    /// The name of the method where the error was detected.
    pub operation: &'static str,
    /// The value that failed the check (`"producer return value"`, `"row value"`).
    pub subject: &'static str,
}

impl fmt::Display for NotSequenceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Enumerator::{}: {} is not a sequence",
            self.operation, self.subject
        )
    }
}

impl std::error::Error for NotSequenceError {}

/// Represents errors that can occur while evaluating a lazy pipeline.
///
/// This enum provides a unified error type for everything a terminal
/// operation can surface. Currently it only contains `NotSequence`, but it
/// is designed to be extensible for future error kinds.
///
/// # Examples
///
/// ```rust
/// use lazyseq::error::{EnumerateError, NotSequenceError};
///
/// let error = EnumerateError::NotSequence(NotSequenceError {
///     operation: "each",
///     subject: "producer return value",
/// });
/// println!("{}", error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerateError {
    /// A pulled value was required to be a sequence but was not.
    NotSequence(NotSequenceError),
}

impl fmt::Display for EnumerateError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSequence(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for EnumerateError {}

impl From<NotSequenceError> for EnumerateError {
    fn from(error: NotSequenceError) -> Self {
        Self::NotSequence(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_sequence_error_display() {
        let error = NotSequenceError {
            operation: "transpose",
            subject: "row value",
        };
        assert_eq!(
            format!("{error}"),
            "Enumerator::transpose: row value is not a sequence"
        );
    }

    #[test]
    fn test_enumerate_error_display() {
        let error = EnumerateError::NotSequence(NotSequenceError {
            operation: "each",
            subject: "producer return value",
        });
        assert_eq!(
            format!("{error}"),
            "Enumerator::each: producer return value is not a sequence"
        );
    }

    #[test]
    fn test_enumerate_error_from_not_sequence() {
        let inner = NotSequenceError {
            operation: "each",
            subject: "producer return value",
        };
        let error = EnumerateError::from(inner.clone());
        assert_eq!(error, EnumerateError::NotSequence(inner));
    }

    #[test]
    fn test_errors_implement_error_trait() {
        use std::error::Error;

        let inner = NotSequenceError {
            operation: "each",
            subject: "producer return value",
        };
        let _: &dyn Error = &inner;
        assert!(inner.source().is_none());

        let error = EnumerateError::NotSequence(inner);
        let _: &dyn Error = &error;
        assert!(error.source().is_none());
    }
}
