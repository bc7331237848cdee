//! Response expectations and assertion outcomes.
//!
//! This module provides the declarative side of a contract case: what status
//! is expected, which predicates must hold at which body paths, and the
//! outcome record produced when one of them is evaluated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Returns true if every status this expectation accepts is 2xx/3xx.
    #[must_use]
    pub fn only_acceptable_codes(&self) -> bool {
        let ok = |code: u16| (200..400).contains(&code);
        match self {
            Self::Exact(code) => ok(*code),
            Self::Range { min, max } => ok(*min) && ok(*max),
            Self::OneOf(codes) => codes.iter().copied().all(ok),
        }
    }
}

impl From<u16> for StatusExpectation {
    fn from(code: u16) -> Self {
        Self::Exact(code)
    }
}

/// Comparison operators for value assertions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
    /// Contains (for strings/arrays).
    Contains,
    /// Matches regex pattern.
    Matches,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Contains => "contains",
            Self::Matches => "matches",
        }
    }
}

/// JSON value types a predicate can require.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    /// JSON array.
    Array,
    /// JSON object.
    Object,
    /// JSON string.
    String,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON null.
    Null,
}

impl JsonType {
    /// Returns the type of a JSON value.
    #[must_use]
    pub const fn of(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }

    /// Returns the lowercase type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicate applied to the value found at a body path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// The path resolves to any value.
    Exists,
    /// The value has the given JSON type.
    IsType {
        /// Required type.
        expected: JsonType,
    },
    /// The value equals the given JSON value.
    Equals {
        /// Expected value.
        value: serde_json::Value,
    },
    /// The value is an array with at least one element.
    NonEmptyArray,
    /// The value is a non-empty string, array or object.
    NonEmpty,
    /// The value compares to the operand with the operator.
    Compare {
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Right-hand operand.
        value: serde_json::Value,
    },
}

/// A predicate bound to a location in the response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyAssertion {
    /// JSON path expression (e.g., "$.data.id").
    pub path: String,
    /// Predicate to apply at the path.
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl BodyAssertion {
    /// Creates an assertion from a path and predicate.
    #[must_use]
    pub fn new(path: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            path: path.into(),
            predicate,
        }
    }

    /// The path must exist.
    #[must_use]
    pub fn exists(path: impl Into<String>) -> Self {
        Self::new(path, Predicate::Exists)
    }

    /// The value at the path must equal `value`.
    #[must_use]
    pub fn equals(path: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::new(
            path,
            Predicate::Equals {
                value: value.into(),
            },
        )
    }

    /// The value at the path must be of type `expected`.
    #[must_use]
    pub fn is_type(path: impl Into<String>, expected: JsonType) -> Self {
        Self::new(path, Predicate::IsType { expected })
    }

    /// The value at the path must be a non-empty array.
    #[must_use]
    pub fn non_empty_array(path: impl Into<String>) -> Self {
        Self::new(path, Predicate::NonEmptyArray)
    }

    /// The value at the path must be a non-empty string, array or object.
    #[must_use]
    pub fn non_empty(path: impl Into<String>) -> Self {
        Self::new(path, Predicate::NonEmpty)
    }

    /// The value at the path must compare to `value` with `operator`.
    #[must_use]
    pub fn compare(
        path: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self::new(
            path,
            Predicate::Compare {
                operator,
                value: value.into(),
            },
        )
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        let path = &self.path;
        match &self.predicate {
            Predicate::Exists => format!("{path} exists"),
            Predicate::IsType { expected } => format!("{path} is {expected}"),
            Predicate::Equals { value } => format!("{path} == {value}"),
            Predicate::NonEmptyArray => format!("{path} is a non-empty array"),
            Predicate::NonEmpty => format!("{path} is not empty"),
            Predicate::Compare { operator, value } => {
                format!("{path} {} {value}", operator.symbol())
            }
        }
    }

    /// Returns the expected side of the assertion for display.
    #[must_use]
    pub fn expected_display(&self) -> String {
        match &self.predicate {
            Predicate::Exists => "any value".to_string(),
            Predicate::IsType { expected } => expected.to_string(),
            Predicate::Equals { value } => value.to_string(),
            Predicate::NonEmptyArray => "non-empty array".to_string(),
            Predicate::NonEmpty => "non-empty value".to_string(),
            Predicate::Compare { operator, value } => format!("{} {value}", operator.symbol()),
        }
    }
}

/// One step of a parsed JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member.
    Field(String),
    /// Array element.
    Index(usize),
}

/// A parsed body path such as `$.data[0].id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses a path expression.
    ///
    /// Supports `$` (the root), `.field` and `[n]`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidJsonPath` for malformed input.
    pub fn parse(path: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidJsonPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let rest = path
            .trim()
            .strip_prefix('$')
            .ok_or_else(|| invalid("must start with '$'"))?;

        let mut segments = Vec::new();
        let mut chars = rest.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    let mut field = String::new();
                    while let Some(&next) = chars.peek() {
                        if next == '.' || next == '[' {
                            break;
                        }
                        field.push(next);
                        chars.next();
                    }
                    if field.is_empty() {
                        return Err(invalid("empty field name"));
                    }
                    segments.push(PathSegment::Field(field));
                }
                '[' => {
                    let mut index = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(digit) => index.push(digit),
                            None => return Err(invalid("unclosed '['")),
                        }
                    }
                    let index = index
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| invalid("array index must be a non-negative integer"))?;
                    segments.push(PathSegment::Index(index));
                }
                other => {
                    return Err(invalid(&format!("unexpected character '{other}'")));
                }
            }
        }

        Ok(Self { segments })
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Resolves the path against a JSON document.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| match segment {
                PathSegment::Field(name) => current.get(name.as_str()),
                PathSegment::Index(index) => current.get(*index),
            })
    }
}

/// What an assertion outcome is about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssertionSubject {
    /// The response status code.
    Status,
    /// A location in the response body.
    Body {
        /// Path that was evaluated.
        path: String,
    },
}

impl fmt::Display for AssertionSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => f.write_str("status"),
            Self::Body { path } => write!(f, "body {path}"),
        }
    }
}

/// Why an assertion failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The status code did not match.
    UnexpectedStatus,
    /// A body value did not match.
    AssertionFailure,
}

/// Result of evaluating a single expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionOutcome {
    /// What was checked.
    pub subject: AssertionSubject,
    /// Human-readable description of the check.
    pub description: String,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Expected value (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value found (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Error message if failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure category; `None` when passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl AssertionOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub fn pass(
        subject: AssertionSubject,
        description: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            description: description.into(),
            passed: true,
            expected: None,
            actual: Some(actual.into()),
            message: None,
            failure: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn fail(
        subject: AssertionSubject,
        description: impl Into<String>,
        failure: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            description: description.into(),
            passed: false,
            expected: None,
            actual: None,
            message: Some(message.into()),
            failure: Some(failure),
        }
    }

    /// Attach the expected value (builder pattern).
    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Attach the actual value (builder pattern).
    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    /// Returns true for a failed status check.
    #[must_use]
    pub fn is_unexpected_status(&self) -> bool {
        self.failure == Some(FailureKind::UnexpectedStatus)
    }
}
