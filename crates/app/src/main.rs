//! Reqcheck - Main Entry Point
//!
//! Parses the command line, wires the adapters into the run use case and
//! maps the outcome to the process exit status.

mod cli;
mod telemetry;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use reqcheck_application::{ApplicationError, RunSuite, reqres_suite, select_cases};
use reqcheck_domain::TestSuite;
use reqcheck_infrastructure::{ReqwestHttpClient, SystemClock, TestRunner, load_suite, render};
use tracing::error;

use crate::cli::Cli;

const EXIT_FAILURES: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "run aborted");
            eprintln!("error: {e}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = cli.settings();
    settings.validate()?;

    let suite = match &cli.suite {
        Some(path) => load_suite(path)
            .await
            .map_err(|e| ApplicationError::SuiteLoad(e.to_string()))?,
        None => reqres_suite()?,
    };
    let suite = select_cases(&suite, &cli.filters)?;

    if cli.list {
        print!("{}", list_cases(&suite));
        return Ok(ExitCode::SUCCESS);
    }

    let use_case = RunSuite::new(
        Arc::new(ReqwestHttpClient::new()?),
        Arc::new(TestRunner::new()),
        Arc::new(SystemClock::new()),
        settings,
    );
    let report = use_case.run(&suite).await?;

    print!("{}", render(&report, cli.format.into())?);

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURES)
    })
}

fn list_cases(suite: &TestSuite) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    for case in suite.cases() {
        let _ = writeln!(
            out,
            "{}\t{} {}\t{}",
            case.name,
            case.method,
            case.path,
            case.expected_status.description()
        );
        if let Some(precondition) = &case.precondition {
            let _ = writeln!(out, "\tprecondition: {precondition}");
        }
    }
    out
}
