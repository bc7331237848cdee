//! Plain-text report.

use std::fmt::Write as _;
use std::time::Duration;

use reqcheck_domain::{CaseResult, SuiteReport};

/// Renders a report as plain text.
///
/// One line per case, followed by indented detail lines for failed
/// assertions and transport errors, then a summary line.
#[must_use]
pub fn render_text(report: &SuiteReport) -> String {
    let mut out = String::new();
    let noun = if report.total == 1 { "case" } else { "cases" };
    let _ = writeln!(out, "{} ({} {noun})", report.suite_name, report.total);

    for result in &report.results {
        render_case(&mut out, result);
    }

    let _ = writeln!(
        out,
        "\n{} passed, {} failed, {} transport errors, {} total in {} ({:.1}% passed)",
        report.passed,
        report.failed,
        report.transport_errors,
        report.total,
        format_duration(report.duration),
        report.pass_rate()
    );
    out
}

fn render_case(out: &mut String, result: &CaseResult) {
    let status = result
        .actual_status()
        .map_or_else(|| "---".to_string(), |s| s.to_string());
    let _ = writeln!(
        out,
        "{:<5} {} {} {} -> {} ({})",
        result.state.label(),
        result.case_name,
        result.method,
        result.url,
        status,
        format_duration(result.duration)
    );

    if result.passed() {
        return;
    }

    for failure in result.failures() {
        let _ = writeln!(out, "      {}: {}", failure.subject, failure.description);
        if let Some(expected) = &failure.expected {
            let _ = writeln!(out, "        expected: {expected}");
        }
        if let Some(actual) = &failure.actual {
            let _ = writeln!(out, "        actual:   {actual}");
        }
        if let Some(message) = &failure.message {
            let _ = writeln!(out, "        {message}");
        }
    }

    if let Some(error) = &result.transport_error {
        let _ = writeln!(out, "      {}: {}", error.kind.title(), error.message);
        for hint in error.kind.suggestions() {
            let _ = writeln!(out, "        hint: {hint}");
        }
    }

    if let Some(precondition) = &result.precondition {
        let _ = writeln!(out, "      precondition: {precondition}");
    }
}

fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
