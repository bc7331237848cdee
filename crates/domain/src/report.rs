//! Per-case results and suite-level aggregation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::HttpMethod;
use crate::state::{CaseState, RequestErrorKind};
use crate::testing::AssertionOutcome;

/// Why no response could be obtained for a case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportFailure {
    /// Error category.
    pub kind: RequestErrorKind,
    /// Error message from the client.
    pub message: String,
}

/// What the runner kept from a received response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseSnapshot {
    /// Actual status code.
    pub status: u16,
    /// Parsed JSON body, if the body was JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<serde_json::Value>,
    /// Raw body when it was not JSON (truncated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Result of running one case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseResult {
    /// Name of the case this result belongs to.
    pub case_name: String,
    /// Method used.
    pub method: HttpMethod,
    /// Fully resolved URL.
    pub url: String,
    /// Terminal state.
    pub state: CaseState,
    /// Response snapshot; `None` on transport error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSnapshot>,
    /// Assertion outcomes in evaluation order (status first).
    #[serde(default)]
    pub assertions: Vec<AssertionOutcome>,
    /// Transport failure details, when `state` is `TransportError`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_error: Option<TransportFailure>,
    /// Precondition copied from the case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precondition: Option<String>,
    /// Wall time spent on the case.
    #[serde(with = "crate::serde_helpers::duration_millis")]
    pub duration: Duration,
}

impl CaseResult {
    /// Returns true when the case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.state == CaseState::Passed
    }

    /// Returns the actual status, if a response arrived.
    #[must_use]
    pub fn actual_status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Returns the failed assertion outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.assertions.iter().filter(|a| !a.passed)
    }
}

/// Aggregated results of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteReport {
    /// Run identifier.
    pub run_id: Uuid,
    /// Suite that was run.
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case results, in input order.
    pub results: Vec<CaseResult>,
    /// Total number of cases.
    pub total: usize,
    /// Cases that passed.
    pub passed: usize,
    /// Cases that received a response but failed an assertion.
    pub failed: usize,
    /// Cases that never received a response.
    pub transport_errors: usize,
    /// Run duration.
    #[serde(with = "crate::serde_helpers::duration_millis")]
    pub duration: Duration,
}

impl SuiteReport {
    /// Create a report, computing the totals.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<CaseResult>,
        duration: Duration,
    ) -> Self {
        let count = |state: CaseState| results.iter().filter(|r| r.state == state).count();
        let passed = count(CaseState::Passed);
        let failed = count(CaseState::Failed);
        let transport_errors = count(CaseState::TransportError);

        Self {
            run_id: Uuid::now_v7(),
            suite_name: suite_name.into(),
            started_at,
            total: results.len(),
            passed,
            failed,
            transport_errors,
            results,
            duration,
        }
    }

    /// Check if every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
