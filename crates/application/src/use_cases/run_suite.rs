//! Run Suite Use Case
//!
//! Executes every case of a suite against the service under test and
//! aggregates the per-case results into a `SuiteReport`.

use std::sync::Arc;
use std::time::Instant;

use reqcheck_domain::{
    CaseResult, CaseState, RequestSpec, ResponseSnapshot, ResponseSpec, SuiteReport, TestCase,
    TestSuite, TransportFailure,
};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::ports::{CaseEvaluator, Clock, HttpClient};
use crate::settings::{RunMode, RunSettings};
use crate::{ApplicationError, ApplicationResult};

/// Longest non-JSON body kept in a snapshot, in characters.
const TEXT_SNAPSHOT_LIMIT: usize = 500;

/// Use case for running a contract suite.
///
/// Each case is executed exactly once: no retries, no backoff. A failure in
/// one case never stops the run.
///
/// # Example
///
/// ```ignore
/// let use_case = RunSuite::new(
///     Arc::new(ReqwestHttpClient::new()?),
///     Arc::new(TestRunner::new()),
///     Arc::new(SystemClock::new()),
///     RunSettings::default(),
/// );
/// let report = use_case.run(&reqres_suite()?).await?;
/// ```
pub struct RunSuite<C: HttpClient, E: CaseEvaluator> {
    client: Arc<C>,
    evaluator: Arc<E>,
    clock: Arc<dyn Clock>,
    settings: Arc<RunSettings>,
}

impl<C, E> RunSuite<C, E>
where
    C: HttpClient + 'static,
    E: CaseEvaluator + 'static,
{
    /// Creates the use case.
    pub fn new(
        client: Arc<C>,
        evaluator: Arc<E>,
        clock: Arc<dyn Clock>,
        settings: RunSettings,
    ) -> Self {
        Self {
            client,
            evaluator,
            clock,
            settings: Arc::new(settings),
        }
    }

    /// Runs every case of `suite` and returns the results in input order.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid settings or an internal fault;
    /// case failures and transport errors are part of the report.
    pub async fn run(&self, suite: &TestSuite) -> ApplicationResult<SuiteReport> {
        self.settings.validate()?;

        let started_at = self.clock.now();
        let started = Instant::now();
        info!(
            suite = %suite.name,
            cases = suite.len(),
            mode = ?self.settings.mode,
            base_url = %self.settings.base_url,
            "starting run"
        );

        let results = match self.settings.mode {
            RunMode::Serial => self.run_serial(suite.cases()).await?,
            RunMode::Parallel => self.run_parallel(suite.cases()).await?,
        };

        let report = SuiteReport::new(&suite.name, started_at, results, started.elapsed());
        info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            transport_errors = report.transport_errors,
            "run finished"
        );
        Ok(report)
    }

    async fn run_serial(&self, cases: &[TestCase]) -> ApplicationResult<Vec<CaseResult>> {
        let mut results = Vec::with_capacity(cases.len());
        for case in cases {
            let result =
                run_case(self.client.as_ref(), self.evaluator.as_ref(), &self.settings, case)
                    .await?;
            results.push(result);
        }
        Ok(results)
    }

    async fn run_parallel(&self, cases: &[TestCase]) -> ApplicationResult<Vec<CaseResult>> {
        let mut tasks = JoinSet::new();
        for (index, case) in cases.iter().cloned().enumerate() {
            let client = Arc::clone(&self.client);
            let evaluator = Arc::clone(&self.evaluator);
            let settings = Arc::clone(&self.settings);
            tasks.spawn(async move {
                let result =
                    run_case(client.as_ref(), evaluator.as_ref(), &settings, &case).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<CaseResult>> = vec![None; cases.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, result) =
                joined.map_err(|e| ApplicationError::Internal(format!("case task failed: {e}")))?;
            slots[index] = Some(result?);
        }

        slots
            .into_iter()
            .zip(cases)
            .map(|(slot, case)| {
                slot.ok_or_else(|| {
                    ApplicationError::Internal(format!("no result for case '{}'", case.name))
                })
            })
            .collect()
    }
}

/// Builds the outgoing request for a case.
#[must_use]
pub fn build_request(settings: &RunSettings, case: &TestCase) -> RequestSpec {
    let mut request = RequestSpec::new(case.method, settings.resolve_url(&case.path))
        .with_timeout(settings.timeout);
    request.headers.clone_from(&settings.default_headers);
    request.body = case.body_value();
    request
}

async fn run_case<C, E>(
    client: &C,
    evaluator: &E,
    settings: &RunSettings,
    case: &TestCase,
) -> ApplicationResult<CaseResult>
where
    C: HttpClient + ?Sized,
    E: CaseEvaluator + ?Sized,
{
    let state = CaseState::Pending.advance(CaseState::Running)?;
    let request = build_request(settings, case);
    debug!(case = %case.name, method = %request.method, url = %request.url, "running case");

    let started = Instant::now();
    let outcome = client.execute(&request).await;
    let duration = started.elapsed();

    let mut result = CaseResult {
        case_name: case.name.clone(),
        method: case.method,
        url: request.url,
        state,
        response: None,
        assertions: Vec::new(),
        transport_error: None,
        precondition: case.precondition.clone(),
        duration,
    };

    match outcome {
        Ok(response) => {
            let assertions = evaluator.evaluate(case, &response);
            let next = if assertions.iter().all(|a| a.passed) {
                CaseState::Passed
            } else {
                CaseState::Failed
            };
            result.state = state.advance(next)?;
            result.response = Some(snapshot(&response));
            result.assertions = assertions;
            info!(
                case = %case.name,
                status = response.status,
                state = %result.state,
                duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "case finished"
            );
        }
        Err(err) => {
            let kind = err.to_error_kind();
            warn!(case = %case.name, kind = kind.title(), error = %err, "transport error");
            result.state = state.advance(CaseState::TransportError)?;
            result.transport_error = Some(TransportFailure {
                kind,
                message: err.to_string(),
            });
        }
    }

    Ok(result)
}

fn snapshot(response: &ResponseSpec) -> ResponseSnapshot {
    let json = response.body_as_json();
    let text = if json.is_none() && !response.body.trim().is_empty() {
        Some(response.body.chars().take(TEXT_SNAPSHOT_LIMIT).collect())
    } else {
        None
    };
    ResponseSnapshot {
        status: response.status,
        json,
        text,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use reqcheck_domain::request::Header;
    use reqcheck_domain::{
        AssertionOutcome, AssertionSubject, FailureKind, HttpMethod, RequestErrorKind,
    };
    use serde_json::json;

    use crate::ports::{HttpClientError, HttpFuture};

    /// Mock HTTP client answering by URL suffix and recording requests.
    struct MockHttpClient {
        routes: Vec<(String, Result<ResponseSpec, HttpClientError>)>,
        delays: Vec<(String, Duration)>,
        seen: Mutex<Vec<RequestSpec>>,
    }

    impl MockHttpClient {
        fn new() -> Self {
            Self {
                routes: Vec::new(),
                delays: Vec::new(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn respond(mut self, suffix: &str, status: u16, body: &str) -> Self {
            let response = ResponseSpec::new(
                status,
                HashMap::new(),
                body.as_bytes(),
                Duration::from_millis(5),
            );
            self.routes.push((suffix.to_string(), Ok(response)));
            self
        }

        fn delay(mut self, suffix: &str, delay: Duration) -> Self {
            self.delays.push((suffix.to_string(), delay));
            self
        }

        fn fail(mut self, suffix: &str, err: HttpClientError) -> Self {
            self.routes.push((suffix.to_string(), Err(err)));
            self
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
            self.seen.lock().unwrap().push(request.clone());
            let result = self
                .routes
                .iter()
                .find(|(suffix, _)| request.url.ends_with(suffix.as_str()))
                .map(|(_, result)| result.clone())
                .unwrap_or_else(|| Err(HttpClientError::Other("no route".to_string())));
            let delay = self
                .delays
                .iter()
                .find(|(suffix, _)| request.url.ends_with(suffix.as_str()))
                .map(|(_, delay)| *delay);
            Box::pin(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            })
        }
    }

    /// Evaluator that only checks the status code.
    struct StatusOnly;

    impl CaseEvaluator for StatusOnly {
        fn evaluate(&self, case: &TestCase, response: &ResponseSpec) -> Vec<AssertionOutcome> {
            let description = format!("status {}", case.expected_status.description());
            if case.expected_status.matches(response.status) {
                vec![AssertionOutcome::pass(
                    AssertionSubject::Status,
                    description,
                    response.status.to_string(),
                )]
            } else {
                vec![AssertionOutcome::fail(
                    AssertionSubject::Status,
                    description,
                    FailureKind::UnexpectedStatus,
                    "status mismatch",
                )]
            }
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn suite() -> TestSuite {
        TestSuite::new(
            "mock",
            vec![
                TestCase::new("List users", HttpMethod::Get, "/api/users?page=2", 200),
                TestCase::new("User not found", HttpMethod::Get, "/api/users/23", 404)
                    .accept_any_status(),
                TestCase::new("Create user", HttpMethod::Post, "/api/users", 201)
                    .with_body(json!({"name": "Sudheesh", "job": "Engineer"})),
            ],
        )
        .unwrap()
    }

    fn use_case(client: MockHttpClient, mode: RunMode) -> RunSuite<MockHttpClient, StatusOnly> {
        RunSuite::new(
            Arc::new(client),
            Arc::new(StatusOnly),
            Arc::new(FixedClock(fixed_time())),
            RunSettings::new("https://api.test/")
                .with_mode(mode)
                .with_header(Header::new("x-api-key", "k")),
        )
    }

    fn happy_client() -> MockHttpClient {
        MockHttpClient::new()
            .respond("/api/users?page=2", 200, r#"{"data": [{"id": 1}]}"#)
            .respond("/api/users/23", 404, "{}")
            .respond("/api/users", 201, r#"{"name": "Sudheesh"}"#)
    }

    #[tokio::test]
    async fn test_serial_run_all_pass() {
        let use_case = use_case(happy_client(), RunMode::Serial);
        let report = use_case.run(&suite()).await.unwrap();

        assert!(report.all_passed());
        assert_eq!(report.total, 3);
        assert_eq!(report.started_at, fixed_time());
        let names: Vec<_> = report.results.iter().map(|r| r.case_name.as_str()).collect();
        assert_eq!(names, vec!["List users", "User not found", "Create user"]);
        assert_eq!(report.results[1].actual_status(), Some(404));
        assert_eq!(
            report.results[0].response.as_ref().unwrap().json,
            Some(json!({"data": [{"id": 1}]}))
        );
    }

    #[tokio::test]
    async fn test_requests_are_built_from_settings() {
        let use_case = use_case(happy_client(), RunMode::Serial);
        use_case.run(&suite()).await.unwrap();

        let seen = use_case.client.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].url, "https://api.test/api/users?page=2");
        assert_eq!(seen[2].method, HttpMethod::Post);
        assert_eq!(seen[2].body, Some(json!({"name": "Sudheesh", "job": "Engineer"})));
        assert!(seen.iter().all(|r| r.has_header("x-api-key")));
    }

    #[tokio::test]
    async fn test_transport_error_is_reported_separately() {
        let client = MockHttpClient::new()
            .fail(
                "/api/users?page=2",
                HttpClientError::Timeout { timeout_ms: 100 },
            )
            .respond("/api/users/23", 404, "")
            .respond("/api/users", 500, "oops");
        let report = use_case(client, RunMode::Serial).run(&suite()).await.unwrap();

        assert_eq!(report.transport_errors, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.passed, 1);

        let timed_out = &report.results[0];
        assert_eq!(timed_out.state, CaseState::TransportError);
        assert!(timed_out.response.is_none());
        assert!(timed_out.assertions.is_empty());
        assert_eq!(
            timed_out.transport_error.as_ref().map(|t| t.kind),
            Some(RequestErrorKind::Timeout)
        );

        let failed = &report.results[2];
        assert_eq!(failed.state, CaseState::Failed);
        assert!(failed.transport_error.is_none());
        assert_eq!(
            failed.response.as_ref().unwrap().text.as_deref(),
            Some("oops")
        );
    }

    #[tokio::test]
    async fn test_non_2xx_response_is_never_a_transport_error() {
        let client = MockHttpClient::new()
            .respond("/api/users?page=2", 503, "")
            .respond("/api/users/23", 404, "")
            .respond("/api/users", 400, "{}");
        let report = use_case(client, RunMode::Serial).run(&suite()).await.unwrap();

        assert_eq!(report.transport_errors, 0);
        assert!(report.results.iter().all(|r| r.response.is_some()));
    }

    #[tokio::test]
    async fn test_parallel_run_preserves_order() {
        // The first case answers last, so completion order differs from input order
        let client = happy_client().delay("/api/users?page=2", Duration::from_millis(200));
        let report = use_case(client, RunMode::Parallel)
            .run(&suite())
            .await
            .unwrap();

        let names: Vec<_> = report.results.iter().map(|r| r.case_name.as_str()).collect();
        assert_eq!(names, vec!["List users", "User not found", "Create user"]);
        assert!(report.all_passed());
        assert_eq!(report.results[0].actual_status(), Some(200));
        assert_eq!(report.results[2].actual_status(), Some(201));
    }

    #[tokio::test]
    async fn test_invalid_settings_abort_before_requests() {
        let use_case = RunSuite::new(
            Arc::new(happy_client()),
            Arc::new(StatusOnly),
            Arc::new(FixedClock(fixed_time())),
            RunSettings::new("reqres.in"),
        );
        let result = use_case.run(&suite()).await;

        assert!(matches!(result, Err(ApplicationError::InvalidConfig(_))));
        assert!(use_case.client.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_build_request_without_body() {
        let case = TestCase::new("Delete user", HttpMethod::Delete, "/api/users/2", 204);
        let settings = RunSettings::new("https://reqres.in").with_timeout(Duration::from_secs(3));
        let request = build_request(&settings, &case);

        assert_eq!(request.url, "https://reqres.in/api/users/2");
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.timeout, Duration::from_secs(3));
        assert!(request.body.is_none());
    }
}
