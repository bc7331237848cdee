//! Case evaluator port

use reqcheck_domain::{AssertionOutcome, ResponseSpec, TestCase};

/// Port for checking a received response against a case's expectations.
///
/// Implementations return one outcome for the status check followed by
/// one outcome per body assertion that was evaluated.
pub trait CaseEvaluator: Send + Sync {
    /// Evaluates every expectation of `case` against `response`.
    fn evaluate(&self, case: &TestCase, response: &ResponseSpec) -> Vec<AssertionOutcome>;
}
