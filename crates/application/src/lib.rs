//! Reqcheck Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration
//! - The built-in ReqRes case table
//! - Application-level error handling

pub mod catalog;
pub mod error;
pub mod ports;
pub mod settings;
pub mod use_cases;

pub use catalog::reqres_suite;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{CaseEvaluator, Clock, HttpClient, HttpClientError, HttpFuture};
pub use settings::{DEFAULT_BASE_URL, RunMode, RunSettings};
pub use use_cases::{RunSuite, build_request, select_cases};
