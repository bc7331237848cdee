//! Run settings shared by every case of a run.

use std::time::Duration;

use reqcheck_domain::request::{DEFAULT_TIMEOUT, Header};

use crate::{ApplicationError, ApplicationResult};

/// Default service under test.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in";

/// How cases are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// One case at a time, in input order.
    #[default]
    Serial,
    /// Every case on its own task; results keep input order.
    Parallel,
}

/// Immutable settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Base URL case paths are appended to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Scheduling mode.
    pub mode: RunMode,
    /// Headers sent with every request.
    pub default_headers: Vec<Header>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            mode: RunMode::Serial,
            default_headers: Vec::new(),
        }
    }
}

impl RunSettings {
    /// Creates settings for `base_url` with defaults for everything else.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the run mode (builder pattern).
    #[must_use]
    pub const fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Adds a header sent with every request (builder pattern).
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.default_headers.push(header);
        self
    }

    /// Joins the base URL and a case path.
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Validates the settings before a run.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidConfig` for an empty or non-HTTP
    /// base URL or a zero timeout.
    pub fn validate(&self) -> ApplicationResult<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ApplicationError::InvalidConfig(
                "base URL is required".to_string(),
            ));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ApplicationError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{base}'"
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApplicationError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
