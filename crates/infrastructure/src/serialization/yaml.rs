//! YAML deserialization for hand-written suite files.

use serde::de::DeserializeOwned;

use super::SerializationError;

/// Deserializes YAML from a string.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or doesn't match the expected type.
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, SerializationError> {
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqcheck_domain::{BodyAssertion, HttpMethod, StatusExpectation, TestCase};

    #[test]
    fn test_case_from_yaml() {
        let yaml = r#"
name: Register (fail)
method: POST
path: /api/register
body:
  email: sydney@fife
expected_status: 400
fail_on_status: false
assertions:
  - path: $.error
    type: equals
    value: Missing password
"#;
        let case: TestCase = from_yaml(yaml).expect("valid case");

        assert_eq!(case.method, HttpMethod::Post);
        assert_eq!(case.expected_status, StatusExpectation::Exact(400));
        assert!(!case.fail_on_status);
        assert_eq!(
            case.assertions,
            vec![BodyAssertion::equals("$.error", "Missing password")]
        );
    }

    #[test]
    fn test_status_range_from_yaml() {
        let yaml = "name: any ok\nmethod: GET\npath: /api/users\nexpected_status:\n  min: 200\n  max: 299\n";
        let case: TestCase = from_yaml(yaml).expect("valid case");
        assert_eq!(case.expected_status, StatusExpectation::success());
        assert!(case.fail_on_status);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let yaml = "name: bad\nmethod: PATCH\npath: /api/users\nexpected_status: 200\n";
        let err = from_yaml::<TestCase>(yaml).expect_err("PATCH is unsupported");
        assert!(matches!(err, SerializationError::Yaml(_)));
    }
}
