// Copyright 2025 Cowboy AI, LLC.

//! Error types for categorization and memoization

use thiserror::Error;

/// Errors that can occur while categorizing subjects or caching results
#[derive(Debug, Clone, Error)]
pub enum CategoryError {
    /// A leaf predicate could not evaluate a subject
    #[error("Predicate evaluation failed: {predicate} - {reason}")]
    PredicateFailed {
        /// Name of the predicate that failed
        predicate: String,
        /// Why the subject could not be evaluated
        reason: String,
    },

    /// A vectorized evaluation produced the wrong number of results
    #[error("Shape mismatch: expected {expected} results, but found {actual}")]
    ShapeMismatch {
        /// Number of subjects handed in
        expected: usize,
        /// Number of results handed back
        actual: usize,
    },

    /// A required context parameter was not supplied
    #[error("Missing context parameter: {0}")]
    MissingParameter(String),

    /// A cache capacity that can never be honoured
    #[error("Invalid cache capacity for {method}: {capacity}")]
    InvalidCapacity {
        /// Method the capacity was configured for
        method: String,
        /// The rejected capacity
        capacity: i64,
    },

    /// A memoized method was called with different argument or result types
    #[error("Cache signature mismatch for {method}")]
    CacheSignatureMismatch {
        /// Method registered with other types
        method: String,
    },

    /// A method name was registered with a second computation
    #[error("Method already memoized: {method}")]
    MethodAlreadyMemoized {
        /// The name already bound
        method: String,
    },

    /// A method was called that was never registered
    #[error("Unknown method: {method}")]
    UnknownMethod {
        /// The unregistered name
        method: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for categorization operations
pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<serde_json::Error> for CategoryError {
    fn from(err: serde_json::Error) -> Self {
        CategoryError::SerializationError(err.to_string())
    }
}

impl CategoryError {
    /// Create a predicate failure for the named predicate
    pub fn predicate_failed(predicate: impl Into<String>, reason: impl Into<String>) -> Self {
        CategoryError::PredicateFailed {
            predicate: predicate.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error stems from configuration rather than evaluation
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CategoryError::InvalidCapacity { .. }
                | CategoryError::CacheSignatureMismatch { .. }
                | CategoryError::MethodAlreadyMemoized { .. }
                | CategoryError::UnknownMethod { .. }
                | CategoryError::SerializationError(_)
        )
    }

    /// Check if this error was raised while evaluating subjects
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            CategoryError::PredicateFailed { .. }
                | CategoryError::ShapeMismatch { .. }
                | CategoryError::MissingParameter(_)
        )
    }
}
