//! Contract cases and suites.
//!
//! A `TestCase` is one declared request/expectation pair. A `TestSuite` is
//! the ordered, immutable list of cases a run executes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;
use crate::testing::{BodyAssertion, JsonPath, StatusExpectation};

const fn default_fail_on_status() -> bool {
    true
}

/// One declared request and the expectations on its response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    /// Unique case name.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path (with optional query) appended to the base URL.
    pub path: String,
    /// JSON object sent as the request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Map<String, serde_json::Value>>,
    /// Expected status code.
    pub expected_status: StatusExpectation,
    /// Body assertions, evaluated in order.
    #[serde(default)]
    pub assertions: Vec<BodyAssertion>,
    /// Auto-fail when the status is outside 2xx/3xx.
    #[serde(default = "default_fail_on_status")]
    pub fail_on_status: bool,
    /// Remote state this case assumes exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precondition: Option<String>,
}

impl TestCase {
    /// Creates a case with no body and no body assertions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            expected_status: StatusExpectation::Exact(expected_status),
            assertions: Vec::new(),
            fail_on_status: true,
            precondition: None,
        }
    }

    /// Sets the request body from a JSON value.
    ///
    /// Non-object values are ignored; bodies are key-value mappings.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = body {
            self.body = Some(map);
        }
        self
    }

    /// Replaces the status expectation (builder pattern).
    #[must_use]
    pub fn with_status(mut self, expected: StatusExpectation) -> Self {
        self.expected_status = expected;
        self
    }

    /// Appends a body assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: BodyAssertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Lets non-2xx/3xx responses through for manual assertion.
    #[must_use]
    pub const fn accept_any_status(mut self) -> Self {
        self.fail_on_status = false;
        self
    }

    /// Documents remote state the case relies on.
    #[must_use]
    pub fn with_precondition(mut self, precondition: impl Into<String>) -> Self {
        self.precondition = Some(precondition.into());
        self
    }

    /// Returns the body as a JSON value, if any.
    #[must_use]
    pub fn body_value(&self) -> Option<serde_json::Value> {
        self.body.clone().map(serde_json::Value::Object)
    }

    /// Checks the case is well formed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCase` or `DomainError::InvalidJsonPath`.
    pub fn validate(&self) -> DomainResult<()> {
        let invalid = |reason: &str| DomainError::InvalidCase {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if !self.path.starts_with('/') {
            return Err(invalid("path must start with '/'"));
        }
        for assertion in &self.assertions {
            JsonPath::parse(&assertion.path)?;
        }
        Ok(())
    }
}

/// An ordered, immutable collection of cases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestSuite {
    /// Test suite name.
    pub name: String,
    /// Cases in execution order.
    cases: Vec<TestCase>,
}

impl TestSuite {
    /// Creates a suite after validating every case.
    ///
    /// # Errors
    ///
    /// Returns an error if the suite is empty, a case is invalid, or two
    /// cases share a name.
    pub fn new(name: impl Into<String>, cases: Vec<TestCase>) -> DomainResult<Self> {
        let suite = Self {
            name: name.into(),
            cases,
        };
        suite.validate()?;
        Ok(suite)
    }

    /// Validates the suite as a whole.
    ///
    /// # Errors
    ///
    /// See [`TestSuite::new`].
    pub fn validate(&self) -> DomainResult<()> {
        if self.cases.is_empty() {
            return Err(DomainError::InvalidCase {
                name: String::new(),
                reason: format!("suite '{}' has no cases", self.name),
            });
        }
        let mut seen = HashSet::new();
        for case in &self.cases {
            case.validate()?;
            if !seen.insert(case.name.as_str()) {
                return Err(DomainError::InvalidCase {
                    name: case.name.clone(),
                    reason: "duplicate case name".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the cases in execution order.
    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Check if the suite is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Get the number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns a new suite keeping only cases whose name contains any of
    /// `patterns` (case-insensitive), in original order.
    ///
    /// An empty pattern list keeps every case. The result may be empty.
    #[must_use]
    pub fn filtered(&self, patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return self.clone();
        }
        let needles: Vec<String> = patterns.iter().map(|p| p.to_lowercase()).collect();
        let cases = self
            .cases
            .iter()
            .filter(|case| {
                let name = case.name.to_lowercase();
                needles.iter().any(|needle| name.contains(needle.as_str()))
            })
            .cloned()
            .collect();
        Self {
            name: self.name.clone(),
            cases,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_cases() -> Vec<TestCase> {
        vec![
            TestCase::new("List users", HttpMethod::Get, "/api/users?page=2", 200)
                .with_assertion(BodyAssertion::non_empty_array("$.data")),
            TestCase::new("User not found", HttpMethod::Get, "/api/users/23", 404)
                .accept_any_status(),
            TestCase::new("Create user", HttpMethod::Post, "/api/users", 201)
                .with_body(json!({"name": "Sudheesh", "job": "Engineer"})),
        ]
    }

    #[test]
    fn test_case_builder() {
        let case = TestCase::new("Login (fail)", HttpMethod::Post, "/api/login", 400)
            .with_body(json!({"email": "peter@klaven"}))
            .with_assertion(BodyAssertion::equals("$.error", "Missing password"))
            .accept_any_status()
            .with_precondition("none");

        assert!(!case.fail_on_status);
        assert_eq!(case.expected_status, StatusExpectation::Exact(400));
        assert_eq!(case.body_value(), Some(json!({"email": "peter@klaven"})));
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_with_body_ignores_non_objects() {
        let case = TestCase::new("x", HttpMethod::Post, "/x", 200).with_body(json!([1, 2]));
        assert!(case.body.is_none());
    }

    #[test]
    fn test_case_validation() {
        let no_slash = TestCase::new("bad", HttpMethod::Get, "api/users", 200);
        assert!(no_slash.validate().is_err());

        let bad_path = TestCase::new("bad", HttpMethod::Get, "/api/users", 200)
            .with_assertion(BodyAssertion::exists("data"));
        assert!(matches!(
            bad_path.validate(),
            Err(DomainError::InvalidJsonPath { .. })
        ));
    }

    #[test]
    fn test_any_method_may_carry_a_body() {
        for method in [HttpMethod::Get, HttpMethod::Delete] {
            let case = TestCase::new("with body", method, "/api/users/2", 204)
                .with_body(json!({"reason": "cleanup"}));
            assert_eq!(case.validate(), Ok(()));
            assert_eq!(case.body_value(), Some(json!({"reason": "cleanup"})));
        }
    }

    #[test]
    fn test_suite_rejects_duplicates_and_empty() {
        let mut cases = sample_cases();
        cases.push(TestCase::new("List users", HttpMethod::Get, "/api/users", 200));
        assert!(TestSuite::new("dup", cases).is_err());
        assert!(TestSuite::new("empty", Vec::new()).is_err());
    }

    #[test]
    fn test_filter_preserves_order() {
        let suite = TestSuite::new("sample", sample_cases()).unwrap();
        let filtered = suite.filtered(&["USER".to_string()]);
        let names: Vec<_> = filtered.cases().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["List users", "User not found", "Create user"]);

        let filtered = suite.filtered(&["create".to_string(), "list".to_string()]);
        let names: Vec<_> = filtered.cases().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["List users", "Create user"]);

        assert_eq!(suite.filtered(&[]).len(), 3);
        assert!(suite.filtered(&["nothing".to_string()]).is_empty());
    }

    #[test]
    fn test_fail_on_status_defaults_true_in_serde() {
        let case: TestCase = serde_json::from_value(json!({
            "name": "Single user",
            "method": "GET",
            "path": "/api/users/2",
            "expected_status": 200
        }))
        .unwrap();
        assert!(case.fail_on_status);
        assert!(case.assertions.is_empty());
    }
}
