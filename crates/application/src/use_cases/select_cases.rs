//! Case selection use case.

use reqcheck_domain::TestSuite;
use tracing::debug;

use crate::{ApplicationError, ApplicationResult};

/// Narrows a suite to the cases whose name contains any of `patterns`.
///
/// Matching is case-insensitive and keeps the original order. An empty
/// pattern list selects everything.
///
/// # Errors
///
/// Returns `ApplicationError::NoCasesSelected` when nothing matches, so a
/// mistyped filter never turns into an empty green run.
pub fn select_cases(suite: &TestSuite, patterns: &[String]) -> ApplicationResult<TestSuite> {
    let selected = suite.filtered(patterns);
    if selected.is_empty() {
        return Err(ApplicationError::NoCasesSelected {
            patterns: patterns.to_vec(),
        });
    }
    debug!(
        selected = selected.len(),
        total = suite.len(),
        "cases selected"
    );
    Ok(selected)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::reqres_suite;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_by_substring() {
        let suite = reqres_suite().unwrap();
        let selected = select_cases(&suite, &["login".to_string()]).unwrap();
        let names: Vec<_> = selected.cases().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Login (ok)", "Login (fail)"]);
    }

    #[test]
    fn test_empty_filter_selects_all() {
        let suite = reqres_suite().unwrap();
        assert_eq!(select_cases(&suite, &[]).unwrap().len(), suite.len());
    }

    #[test]
    fn test_no_match_is_an_error() {
        let suite = reqres_suite().unwrap();
        let result = select_cases(&suite, &["graphql".to_string()]);
        assert!(matches!(
            result,
            Err(ApplicationError::NoCasesSelected { .. })
        ));
    }
}
