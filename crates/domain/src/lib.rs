//! Reqcheck Domain - Core contract-testing types
//!
//! This crate defines the domain model for the reqcheck contract test runner.
//! All types here are pure Rust with no I/O dependencies.

pub mod case;
pub mod error;
pub mod report;
pub mod request;
pub mod response;
mod serde_helpers;
pub mod state;
pub mod testing;

pub use case::{TestCase, TestSuite};
pub use error::{DomainError, DomainResult};
pub use report::{CaseResult, ResponseSnapshot, SuiteReport, TransportFailure};
pub use request::{HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use state::{CaseState, RequestErrorKind};
pub use testing::{
    AssertionOutcome, AssertionSubject, BodyAssertion, ComparisonOperator, FailureKind, JsonPath,
    JsonType, PathSegment, Predicate, StatusExpectation,
};
