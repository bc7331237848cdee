//! Application error types

use thiserror::Error;
use reqcheck_domain::DomainError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Run settings are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The case filter matched nothing.
    #[error("no cases match filter {patterns:?}")]
    NoCasesSelected {
        /// Patterns that were applied.
        patterns: Vec<String>,
    },

    /// A suite could not be loaded.
    #[error("failed to load suite: {0}")]
    SuiteLoad(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
