//! Test runner implementation.
//!
//! Evaluates a case's expectations against a received response and produces
//! one outcome per check.

use regex::Regex;
use reqcheck_application::ports::CaseEvaluator;
use reqcheck_domain::response::ResponseSpec;
use reqcheck_domain::testing::{
    AssertionOutcome, AssertionSubject, BodyAssertion, ComparisonOperator, FailureKind, JsonPath,
    JsonType, Predicate, StatusExpectation,
};
use reqcheck_domain::TestCase;
use serde_json::Value;

/// Longest value rendered into an outcome before it is truncated.
const PREVIEW_LIMIT: usize = 200;

/// Test runner that executes assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates every expectation of `case` against `response`.
    ///
    /// When the case keeps `fail_on_status` and the status is neither 2xx nor
    /// 3xx, a single `UnexpectedStatus` outcome is returned and the body is
    /// not inspected.
    #[must_use]
    pub fn run(&self, case: &TestCase, response: &ResponseSpec) -> Vec<AssertionOutcome> {
        let status = response.status_code();
        if case.fail_on_status && !status.is_acceptable() {
            return vec![
                AssertionOutcome::fail(
                    AssertionSubject::Status,
                    format!("status {}", case.expected_status.description()),
                    FailureKind::UnexpectedStatus,
                    format!("HTTP {status} is not a success status; body checks skipped"),
                )
                .with_expected(case.expected_status.description())
                .with_actual(status.as_u16().to_string()),
            ];
        }

        let mut outcomes = Vec::with_capacity(case.assertions.len() + 1);
        outcomes.push(check_status_code(response, &case.expected_status));

        if case.assertions.is_empty() {
            return outcomes;
        }

        // Parse once, shared by every body assertion
        let json = response.json().map_err(|e| e.to_string());
        for assertion in &case.assertions {
            outcomes.push(check_body(assertion, json.as_ref()));
        }

        outcomes
    }
}

fn check_status_code(response: &ResponseSpec, expected: &StatusExpectation) -> AssertionOutcome {
    let actual = response.status;
    let description = format!("status {}", expected.description());
    if expected.matches(actual) {
        AssertionOutcome::pass(AssertionSubject::Status, description, actual.to_string())
            .with_expected(expected.description())
    } else {
        AssertionOutcome::fail(
            AssertionSubject::Status,
            description,
            FailureKind::UnexpectedStatus,
            format!("Expected status {}, got {actual}", expected.description()),
        )
        .with_expected(expected.description())
        .with_actual(actual.to_string())
    }
}

fn check_body(assertion: &BodyAssertion, json: Result<&Value, &String>) -> AssertionOutcome {
    let subject = AssertionSubject::Body {
        path: assertion.path.clone(),
    };
    let description = assertion.description();
    let fail = |message: String| {
        AssertionOutcome::fail(
            subject.clone(),
            description.clone(),
            FailureKind::AssertionFailure,
            message,
        )
        .with_expected(assertion.expected_display())
    };

    let json = match json {
        Ok(json) => json,
        Err(e) => return fail(format!("Response body is not JSON: {e}")),
    };

    let path = match JsonPath::parse(&assertion.path) {
        Ok(path) => path,
        Err(e) => return fail(e.to_string()),
    };

    let Some(value) = path.resolve(json) else {
        return fail(format!("JSON path '{}' not found", assertion.path));
    };

    let actual = preview(value);
    match check_predicate(&assertion.predicate, value) {
        Ok(()) => AssertionOutcome::pass(subject.clone(), description.clone(), actual)
            .with_expected(assertion.expected_display()),
        Err(message) => fail(message).with_actual(actual),
    }
}

impl CaseEvaluator for TestRunner {
    fn evaluate(&self, case: &TestCase, response: &ResponseSpec) -> Vec<AssertionOutcome> {
        self.run(case, response)
    }
}

/// Applies a predicate to a resolved value.
fn check_predicate(predicate: &Predicate, value: &Value) -> Result<(), String> {
    match predicate {
        Predicate::Exists => Ok(()),
        Predicate::IsType { expected } => {
            let actual = JsonType::of(value);
            if actual == *expected {
                Ok(())
            } else {
                Err(format!("Expected {expected}, got {actual}"))
            }
        }
        Predicate::Equals { value: expected } => {
            if value == expected {
                Ok(())
            } else {
                Err(format!("Expected {expected}, got {}", preview(value)))
            }
        }
        Predicate::NonEmptyArray => match value {
            Value::Array(items) if !items.is_empty() => Ok(()),
            Value::Array(_) => Err("Array is empty".to_string()),
            other => Err(format!("Expected array, got {}", JsonType::of(other))),
        },
        Predicate::NonEmpty => {
            let empty = match value {
                Value::String(s) => s.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
                Value::Null => true,
                Value::Bool(_) | Value::Number(_) => false,
            };
            if empty {
                Err(format!("Value is empty: {}", preview(value)))
            } else {
                Ok(())
            }
        }
        Predicate::Compare { operator, value: expected } => {
            if compare_json_values(value, *operator, expected) {
                Ok(())
            } else {
                Err(format!(
                    "Comparison failed: {} {} {expected}",
                    preview(value),
                    operator.symbol()
                ))
            }
        }
    }
}

/// Compare two JSON values using the given operator.
fn compare_json_values(actual: &Value, operator: ComparisonOperator, expected: &Value) -> bool {
    match operator {
        ComparisonOperator::Equals => actual == expected,
        ComparisonOperator::NotEquals => actual != expected,
        ComparisonOperator::GreaterThan => compare_numeric(actual, expected, |a, b| a > b),
        ComparisonOperator::GreaterThanOrEqual => compare_numeric(actual, expected, |a, b| a >= b),
        ComparisonOperator::LessThan => compare_numeric(actual, expected, |a, b| a < b),
        ComparisonOperator::LessThanOrEqual => compare_numeric(actual, expected, |a, b| a <= b),
        ComparisonOperator::Contains => match (actual, expected) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::Array(items), _) => items.contains(expected),
            _ => false,
        },
        ComparisonOperator::Matches => {
            if let (Value::String(s), Value::String(pattern)) = (actual, expected) {
                Regex::new(pattern).is_ok_and(|re| re.is_match(s))
            } else {
                false
            }
        }
    }
}

/// Compare numeric values.
fn compare_numeric<F>(actual: &Value, expected: &Value, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Renders a value for display, truncated on a char boundary.
fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= PREVIEW_LIMIT {
        return rendered;
    }
    let truncated: String = rendered.chars().take(PREVIEW_LIMIT).collect();
    format!("{truncated}...")
}
