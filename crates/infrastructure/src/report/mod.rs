//! Report rendering.
//!
//! Turns a finished [`SuiteReport`] into the text shown on stdout.

mod text;

use reqcheck_domain::SuiteReport;
use thiserror::Error;

use crate::serialization::{SerializationError, to_json_stable};

pub use text::render_text;

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON rendering failed.
    #[error("failed to render JSON report: {0}")]
    Json(#[from] SerializationError),
}

/// Output format for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable, one line per case.
    #[default]
    Text,
    /// The whole report as pretty JSON.
    Json,
}

/// Renders `report` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &SuiteReport, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(to_json_stable(report)?),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_json_render_roundtrips() {
        let report = SuiteReport::new("ReqRes API", Utc::now(), Vec::new(), Duration::from_millis(5));
        let json = render(&report, OutputFormat::Json).unwrap();

        let restored: SuiteReport = crate::serialization::from_json(&json).unwrap();
        assert_eq!(restored.run_id, report.run_id);
        assert_eq!(restored.suite_name, "ReqRes API");
        assert!(json.contains("\"transport_errors\": 0"));
    }
}
