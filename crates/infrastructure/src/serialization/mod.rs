//! Serialization helpers for suite files and reports.
//!
//! JSON output is pretty-printed with 2-space indentation and a trailing
//! newline so reports diff cleanly between runs.

mod json;
mod yaml;

pub use json::{SerializationError, from_json, to_json_stable};
pub use yaml::from_yaml;
