//! Case lifecycle state and transport error categories.
//!
//! Every case moves through `Pending -> Running -> {Passed, Failed,
//! TransportError}` exactly once. There are no retries, so terminal
//! states are final.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Lifecycle state of a single case within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseState {
    /// Not started yet.
    #[default]
    Pending,
    /// Request in flight or assertions being evaluated.
    Running,
    /// Response received and every assertion held.
    Passed,
    /// Response received but at least one assertion failed.
    Failed,
    /// No response could be obtained.
    TransportError,
}

impl CaseState {
    /// Returns true for states that end a case.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::TransportError)
    }

    /// Moves to `next`, rejecting anything outside the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` for an illegal move.
    pub fn advance(self, next: Self) -> DomainResult<Self> {
        let allowed = matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Running, Self::Passed | Self::Failed | Self::TransportError)
        );
        if allowed {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Short label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::TransportError => "ERROR",
        }
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::TransportError => "transport_error",
        };
        f.write_str(name)
    }
}

/// Categories of transport errors for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Request timed out.
    Timeout,

    /// TLS/SSL error.
    TlsError,

    /// Too many redirects.
    TooManyRedirects,

    /// Response arrived but its body could not be read.
    BodyRead,

    /// Unknown or unexpected error.
    Unknown,
}

impl RequestErrorKind {
    /// Returns user-friendly suggestions for this error type.
    #[must_use]
    pub const fn suggestions(&self) -> &[&'static str] {
        match self {
            Self::InvalidUrl => &[
                "Check that the base URL starts with http:// or https://",
                "Verify there are no typos in the case path",
            ],
            Self::DnsError => &[
                "Check if the hostname is correct",
                "Verify your internet connection",
            ],
            Self::ConnectionFailed | Self::ConnectionRefused => &[
                "Check if the server is running",
                "Verify the port number is correct",
            ],
            Self::Timeout => &[
                "The server may be slow or overloaded",
                "Try increasing --timeout-ms",
            ],
            Self::TlsError => &[
                "The server's certificate may be invalid or expired",
                "Verify the hostname matches the certificate",
            ],
            Self::TooManyRedirects => &["The server may have a redirect loop"],
            Self::BodyRead => &["The connection may have been closed mid-response"],
            Self::Unknown => &["Check the error details for more information"],
        }
    }

    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TlsError => "SSL/TLS Error",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::BodyRead => "Response Body Unreadable",
            Self::Unknown => "Unknown Error",
        }
    }
}
