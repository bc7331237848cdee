//! Domain error types

use thiserror::Error;

use crate::state::CaseState;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A JSON path expression is malformed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidJsonPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A case attempted an illegal lifecycle transition.
    #[error("invalid case transition: {from} -> {to}")]
    InvalidTransition {
        /// State the case was in.
        from: CaseState,
        /// State that was requested.
        to: CaseState,
    },

    /// A test case definition is invalid.
    #[error("invalid test case '{name}': {reason}")]
    InvalidCase {
        /// Case name (may be empty when the name itself is the problem).
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
