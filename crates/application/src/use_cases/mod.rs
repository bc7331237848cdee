//! Application use cases (business logic orchestration).

mod run_suite;
mod select_cases;

pub use run_suite::{RunSuite, build_request};
pub use select_cases::select_cases;
