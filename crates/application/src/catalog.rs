//! Built-in ReqRes contract cases.
//!
//! The table mirrors the documented behaviour of the public ReqRes demo API.
//! Several cases depend on the service's fixed seed data; those carry a
//! precondition so a failure caused by drifting seed data is easy to spot.

use reqcheck_domain::{BodyAssertion, HttpMethod, JsonType, TestCase, TestSuite};
use serde_json::json;

use crate::ApplicationResult;

/// Name of the built-in suite.
pub const REQRES_SUITE_NAME: &str = "ReqRes API";

const SEED_USER_2: &str = "user 2 exists in the service's seed data";
const SEED_RESOURCE_2: &str = "resource 2 exists in the service's seed data";

/// Returns the built-in ReqRes suite.
///
/// # Errors
///
/// Only fails if the table itself is malformed.
pub fn reqres_suite() -> ApplicationResult<TestSuite> {
    Ok(TestSuite::new(REQRES_SUITE_NAME, reqres_cases())?)
}

fn reqres_cases() -> Vec<TestCase> {
    use HttpMethod::{Delete, Get, Post, Put};

    vec![
        TestCase::new("List users", Get, "/api/users?page=2", 200)
            .with_assertion(BodyAssertion::non_empty_array("$.data")),
        TestCase::new("Single user", Get, "/api/users/2", 200)
            .with_assertion(BodyAssertion::exists("$.data"))
            .with_assertion(BodyAssertion::equals("$.data.id", 2))
            .with_precondition(SEED_USER_2),
        TestCase::new("User not found", Get, "/api/users/23", 404).accept_any_status(),
        TestCase::new("Create user", Post, "/api/users", 201)
            .with_body(json!({"name": "Sudheesh", "job": "Engineer"}))
            .with_assertion(BodyAssertion::equals("$.name", "Sudheesh"))
            .with_assertion(BodyAssertion::equals("$.job", "Engineer")),
        TestCase::new("Update user", Put, "/api/users/2", 200)
            .with_body(json!({"name": "Sudheesh Patwardhan", "job": "Senior Engineer"}))
            .with_assertion(BodyAssertion::equals("$.name", "Sudheesh Patwardhan"))
            .with_assertion(BodyAssertion::equals("$.job", "Senior Engineer"))
            .with_precondition(SEED_USER_2),
        TestCase::new("Delete user", Delete, "/api/users/2", 204).with_precondition(SEED_USER_2),
        TestCase::new("List resources", Get, "/api/unknown", 200)
            .with_assertion(BodyAssertion::non_empty_array("$.data")),
        TestCase::new("Single resource", Get, "/api/unknown/2", 200)
            .with_assertion(BodyAssertion::exists("$.data"))
            .with_assertion(BodyAssertion::equals("$.data.id", 2))
            .with_precondition(SEED_RESOURCE_2),
        TestCase::new("Resource not found", Get, "/api/unknown/23", 404).accept_any_status(),
        TestCase::new("Register (ok)", Post, "/api/register", 200)
            .with_body(json!({"email": "eve.holt@reqres.in", "password": "pistol"}))
            .with_assertion(BodyAssertion::exists("$.token")),
        TestCase::new("Register (fail)", Post, "/api/register", 400)
            .with_body(json!({"email": "sydney@fife"}))
            .with_assertion(BodyAssertion::equals("$.error", "Missing password"))
            .accept_any_status(),
        TestCase::new("Login (ok)", Post, "/api/login", 200)
            .with_body(json!({"email": "eve.holt@reqres.in", "password": "cityslicka"}))
            .with_assertion(BodyAssertion::non_empty("$.token")),
        TestCase::new("Login (fail)", Post, "/api/login", 400)
            .with_body(json!({"email": "peter@klaven"}))
            .with_assertion(BodyAssertion::equals("$.error", "Missing password"))
            .accept_any_status(),
        TestCase::new("Delayed list", Get, "/api/users?delay=3", 200)
            .with_assertion(BodyAssertion::is_type("$.data", JsonType::Array)),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqcheck_domain::{Predicate, StatusExpectation};

    fn case<'a>(suite: &'a TestSuite, name: &str) -> &'a TestCase {
        suite.cases().iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_suite_is_valid_and_ordered() {
        let suite = reqres_suite().unwrap();
        assert_eq!(suite.len(), 14);
        assert_eq!(suite.cases()[0].name, "List users");
        assert_eq!(suite.cases()[13].name, "Delayed list");
    }

    #[test]
    fn test_error_cases_accept_any_status() {
        let suite = reqres_suite().unwrap();
        for case in suite.cases() {
            let expects_error = !case.expected_status.only_acceptable_codes();
            assert_eq!(
                !case.fail_on_status, expects_error,
                "case '{}' fail_on_status mismatch",
                case.name
            );
        }
    }

    #[test]
    fn test_create_user_payload() {
        let suite = reqres_suite().unwrap();
        let create = case(&suite, "Create user");
        assert_eq!(create.method, HttpMethod::Post);
        assert_eq!(create.expected_status, StatusExpectation::Exact(201));
        assert_eq!(
            create.body_value(),
            Some(json!({"name": "Sudheesh", "job": "Engineer"}))
        );
    }

    #[test]
    fn test_register_fail_expectations() {
        let suite = reqres_suite().unwrap();
        let register = case(&suite, "Register (fail)");
        assert_eq!(register.body_value(), Some(json!({"email": "sydney@fife"})));
        assert_eq!(
            register.assertions,
            vec![BodyAssertion::equals("$.error", "Missing password")]
        );
    }

    #[test]
    fn test_not_found_cases_have_no_body_checks() {
        let suite = reqres_suite().unwrap();
        for name in ["User not found", "Resource not found", "Delete user"] {
            assert!(case(&suite, name).assertions.is_empty(), "{name}");
        }
    }

    #[test]
    fn test_seed_dependent_cases_document_preconditions() {
        let suite = reqres_suite().unwrap();
        for name in ["Single user", "Update user", "Delete user", "Single resource"] {
            assert!(case(&suite, name).precondition.is_some(), "{name}");
        }
    }

    #[test]
    fn test_login_ok_requires_non_empty_token() {
        let suite = reqres_suite().unwrap();
        let login = case(&suite, "Login (ok)");
        assert_eq!(login.assertions[0].predicate, Predicate::NonEmpty);
        assert_eq!(login.assertions[0].path, "$.token");
    }
}
