//! Reqcheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the file formats the
//! binary reads and writes.

pub mod adapters;
pub mod report;
pub mod serialization;
pub mod suite_file;
pub mod testing;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use report::{OutputFormat, ReportError, render, render_text};
pub use serialization::{SerializationError, from_json, from_yaml, to_json_stable};
pub use suite_file::{SuiteFile, SuiteFileError, SuiteFormat, load_suite, parse_suite};
pub use testing::TestRunner;
