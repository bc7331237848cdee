//! Command-line surface.
//!
//! Parses flags into `RunSettings` and the report options the binary needs.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqcheck_application::{DEFAULT_BASE_URL, RunMode, RunSettings};
use reqcheck_domain::request::Header;
use reqcheck_infrastructure::OutputFormat;
use url::Url;

const LONG_ABOUT: &str = r"reqcheck runs HTTP contract cases against the ReqRes demo API
(or any service with the same contract) and reports which ones hold.

EXIT STATUS:
    0  every case passed
    1  at least one case failed or hit a transport error
    2  invalid arguments, unreadable suite file or empty selection

EXAMPLES:
    # Run the built-in suite
    reqcheck

    # Only the login cases, in parallel, as JSON
    reqcheck -f login --parallel --format json

    # A local mock with an API key header
    reqcheck --base-url http://localhost:8080 -H x-api-key:reqres-free-v1

    # Cases from a file
    reqcheck --suite smoke.yaml --list";

#[derive(Debug, Parser)]
#[command(name = "reqcheck")]
#[command(author, version)]
#[command(about = "Contract test runner for the ReqRes demo API")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    /// Base URL case paths are appended to
    #[arg(long, env = "REQCHECK_BASE_URL", default_value = DEFAULT_BASE_URL, value_parser = parse_base_url)]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 30_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Only run cases whose name contains PATTERN (case-insensitive, repeatable)
    #[arg(short, long = "filter", value_name = "PATTERN")]
    pub filters: Vec<String>,

    /// Load cases from a YAML or JSON file instead of the built-in table
    #[arg(long, value_name = "FILE")]
    pub suite: Option<PathBuf>,

    /// Header sent with every request, as NAME:VALUE (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<Header>,

    /// Run every case concurrently; results keep input order
    #[arg(long)]
    pub parallel: bool,

    /// Report format
    #[arg(long, default_value = "text")]
    pub format: FormatArg,

    /// Print the selected cases without running them
    #[arg(long)]
    pub list: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One line per case plus a summary
    Text,
    /// The full report as JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Builds the immutable run settings.
    #[must_use]
    pub fn settings(&self) -> RunSettings {
        let mode = if self.parallel {
            RunMode::Parallel
        } else {
            RunMode::Serial
        };
        self.headers.iter().cloned().fold(
            RunSettings::new(self.base_url.clone())
                .with_timeout(Duration::from_millis(self.timeout_ms))
                .with_mode(mode),
            RunSettings::with_header,
        )
    }
}

fn parse_base_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL '{raw}': {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}', use http or https", url.scheme()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_header(raw: &str) -> Result<Header, String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!("invalid header name '{name}'"));
    }
    Ok(Header::new(name, value.trim()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("reqcheck").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        let settings = cli.settings();

        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.mode, RunMode::Serial);
        assert!(settings.default_headers.is_empty());
        assert_eq!(cli.format, FormatArg::Text);
        assert!(cli.filters.is_empty());
    }

    #[test]
    fn test_full_settings() {
        let cli = parse(&[
            "--base-url",
            "http://localhost:8080/",
            "--timeout-ms",
            "250",
            "--parallel",
            "-H",
            "x-api-key: reqres-free-v1",
            "-f",
            "login",
            "-f",
            "register",
        ])
        .unwrap();
        let settings = cli.settings();

        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.timeout, Duration::from_millis(250));
        assert_eq!(settings.mode, RunMode::Parallel);
        assert_eq!(
            settings.default_headers,
            vec![Header::new("x-api-key", "reqres-free-v1")]
        );
        assert_eq!(cli.filters, vec!["login", "register"]);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(parse(&["--base-url", "reqres.in"]).is_err());
        assert!(parse(&["--base-url", "ftp://reqres.in"]).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(parse(&["--timeout-ms", "0"]).is_err());
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Accept:application/json").unwrap(),
            Header::new("Accept", "application/json")
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(":value").is_err());
        assert!(parse_header("bad name:value").is_err());
    }
}
