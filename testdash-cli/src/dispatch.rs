// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExpectedError,
    output::{OutputContext, OutputOpts},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::{BufRead, BufReader};
use testdash_reporter::reporter::{
    HtmlReport, JsonReport, OutcomeEvent, ResultAggregator, RunSummary, SessionListener,
    TestOutcome,
};
use tracing::{debug, info};

/// Run a test command and turn its results into HTML and JSON dashboards.
///
/// The host runner is spawned with the given arguments; every stdout line
/// that parses as an outcome event is recorded, every other line is passed
/// through untouched. testdash exits with the host runner's exit code.
#[derive(Debug, Parser)]
#[command(name = "testdash", version)]
pub struct TestdashApp {
    #[clap(flatten)]
    output: OutputOpts,

    /// The host test runner command to execute
    #[arg(long, value_name = "COMMAND")]
    runner: String,

    /// HTML report output path
    #[arg(long, value_name = "PATH", default_value = "test_report.html")]
    html: Utf8PathBuf,

    /// JSON report output path
    #[arg(long, value_name = "PATH", default_value = "test_report.json")]
    json: Utf8PathBuf,

    /// Title of the HTML report
    #[arg(long, value_name = "TITLE", default_value = "Test Report")]
    title: String,

    /// Test targets and arguments forwarded to the host runner verbatim
    #[arg(
        value_name = "RUNNER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    runner_args: Vec<String>,
}

impl TestdashApp {
    /// Executes the app, returning the host runner's exit code.
    pub fn exec(self) -> Result<i32, ExpectedError> {
        let ctx = self.output.init();

        info!(
            "running host runner: {} {}",
            self.runner,
            self.runner_args.join(" ")
        );

        let mut aggregator = ResultAggregator::new();
        aggregator.session_started();

        let expression = duct::cmd(self.runner.as_str(), &self.runner_args).unchecked();
        let reader = expression
            .reader()
            .map_err(|error| ExpectedError::runner_spawn(&self.runner, error))?;
        let mut reader = BufReader::new(reader);

        let mut line = String::new();
        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|error| ExpectedError::RunnerRead { error })?;
            if read == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            match serde_json::from_str::<OutcomeEvent>(line) {
                Ok(event) => {
                    debug!(
                        node_id = %event.node_id,
                        outcome = %event.outcome,
                        "outcome event recorded"
                    );
                    aggregator.outcome_reported(&event);
                }
                // The host runner's human output is passed through untouched.
                Err(_) => println!("{line}"),
            }
        }

        let exit_code = reader
            .get_ref()
            .try_wait()
            .map_err(|error| ExpectedError::RunnerRead { error })?
            .and_then(|output| output.status.code())
            .unwrap_or(1);

        aggregator.session_finished();

        HtmlReport::new(&aggregator, &self.title).save(&self.html)?;
        println!("Test report generated: {}", display_path(&self.html));
        JsonReport::new(&aggregator).save(&self.json)?;
        println!("JSON report generated: {}", display_path(&self.json));

        print_summary(&ctx, &aggregator);
        Ok(exit_code)
    }
}

/// The absolute location of a freshly written report; the path as given if
/// canonicalization fails.
fn display_path(path: &Utf8Path) -> Utf8PathBuf {
    path.canonicalize_utf8().unwrap_or_else(|_| path.to_owned())
}

fn print_summary(ctx: &OutputContext, aggregator: &ResultAggregator) {
    let RunSummary {
        total,
        passed,
        failed,
        skipped,
        error,
        duration,
    } = aggregator.summary().clone();

    println!("\nTest Summary:");
    println!("  Total: {total}");
    println!("  Passed: {}", passed.style(ctx.styles.pass));
    println!("  Failed: {}", failed.style(ctx.styles.fail));
    println!("  Skipped: {}", skipped.style(ctx.styles.skip));
    println!("  Error: {}", error.style(ctx.styles.error));
    println!("  Duration: {duration:.2} seconds");

    if ctx.verbose {
        let failing: Vec<_> = aggregator
            .records()
            .iter()
            .filter(|record| {
                matches!(record.outcome, TestOutcome::Failed | TestOutcome::Error)
            })
            .collect();
        if !failing.is_empty() {
            println!("\nFailing tests:");
            for record in failing {
                println!("  {} ({})", record.name, record.file);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_applied() {
        let app = TestdashApp::try_parse_from(["testdash", "--runner", "pytest"])
            .expect("minimal args parse");
        assert_eq!(app.html, Utf8PathBuf::from("test_report.html"));
        assert_eq!(app.json, Utf8PathBuf::from("test_report.json"));
        assert_eq!(app.title, "Test Report");
        assert!(app.runner_args.is_empty());
    }

    #[test]
    fn runner_args_are_forwarded_verbatim() {
        let app = TestdashApp::try_parse_from([
            "testdash",
            "--runner",
            "pytest",
            "--html",
            "out.html",
            "tests/api.py",
            "-k",
            "smoke",
        ])
        .expect("args with hyphens parse");
        assert_eq!(app.html, Utf8PathBuf::from("out.html"));
        assert_eq!(app.runner_args, ["tests/api.py", "-k", "smoke"]);
    }

    #[test]
    fn runner_is_required() {
        let result = TestdashApp::try_parse_from(["testdash"]);
        assert!(result.is_err(), "--runner is required");
    }
}
