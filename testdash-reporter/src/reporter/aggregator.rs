// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folding a stream of outcome events into aggregate state.

use crate::reporter::events::{OutcomeEvent, Phase, SessionListener, TestOutcome};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Counts for the run as a whole.
///
/// Invariant: `total` always equals `passed + failed + skipped + error`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    /// The number of recorded tests.
    pub total: usize,
    /// The number of recorded tests that passed.
    pub passed: usize,
    /// The number of recorded tests that failed.
    pub failed: usize,
    /// The number of recorded tests that were skipped.
    pub skipped: usize,
    /// The number of recorded tests that errored.
    pub error: usize,
    /// Wall-clock seconds between session start and session finish.
    ///
    /// Zero until the session finishes.
    pub duration: f64,
}

impl RunSummary {
    /// Returns the percentage of recorded tests that passed, or `0.0` if
    /// nothing was recorded.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }

    fn record(&mut self, outcome: TestOutcome) {
        self.total += 1;
        match outcome {
            TestOutcome::Passed => self.passed += 1,
            TestOutcome::Failed => self.failed += 1,
            TestOutcome::Skipped => self.skipped += 1,
            TestOutcome::Error => self.error += 1,
        }
    }
}

/// Per-category outcome counts.
///
/// Created lazily when a category is first sighted; fields other than the
/// sighted outcome start at zero.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CategoryTally {
    /// Tests in this category that passed.
    pub passed: usize,
    /// Tests in this category that failed.
    pub failed: usize,
    /// Tests in this category that were skipped.
    pub skipped: usize,
    /// Tests in this category that errored.
    pub error: usize,
}

impl CategoryTally {
    /// Returns the total number of tests recorded against this category.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.error
    }

    fn record(&mut self, outcome: TestOutcome) {
        match outcome {
            TestOutcome::Passed => self.passed += 1,
            TestOutcome::Failed => self.failed += 1,
            TestOutcome::Skipped => self.skipped += 1,
            TestOutcome::Error => self.error += 1,
        }
    }
}

/// The recorded result of one test, derived from its authoritative event.
///
/// Immutable once created.
#[derive(Clone, Debug, Serialize)]
pub struct TestRecord {
    /// The test's short name.
    pub name: String,
    /// The file the test originated from.
    pub file: String,
    /// The category the test was bucketed into.
    pub category: String,
    /// A human-readable description: the test's doc text, or its short name.
    pub description: String,
    /// The recorded outcome.
    pub outcome: TestOutcome,
    /// Time taken by the recorded phase, in seconds.
    pub duration: f64,
    /// The failure's long text; empty unless the outcome is `failed`.
    pub error_message: String,
}

/// Accumulates per-test outcome events into durable aggregate state.
///
/// Constructed explicitly and registered with a host runner via
/// [`SessionListener`]; one instance per run. Reports can be rendered from it
/// at any point, including mid-run.
#[derive(Clone, Debug, Default)]
pub struct ResultAggregator {
    started_at: Option<DateTime<Local>>,
    summary: RunSummary,
    categories: IndexMap<String, CategoryTally>,
    records: Vec<TestRecord>,
}

impl ResultAggregator {
    /// Creates a new, empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the run-level summary counts.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Returns the per-category tallies, in first-sighted order.
    pub fn categories(&self) -> &IndexMap<String, CategoryTally> {
        &self.categories
    }

    /// Returns the recorded tests, in first-recorded order.
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Returns true if `event` is the authoritative event for its test.
    ///
    /// A test produces up to three phase events per execution. Counting the
    /// `call` event, plus `setup` events that did not pass (setup failures,
    /// errors, and skips never reach `call`), records each test exactly once.
    fn is_authoritative(event: &OutcomeEvent) -> bool {
        match event.phase {
            Phase::Call => true,
            Phase::Setup => event.outcome != TestOutcome::Passed,
            Phase::Teardown => false,
        }
    }
}

impl SessionListener for ResultAggregator {
    fn session_started(&mut self) {
        self.started_at = Some(Local::now());
    }

    fn session_finished(&mut self) {
        // Finishing without a start is a caller contract violation; store a
        // zero duration rather than a nonsensical one.
        self.summary.duration = match self.started_at {
            Some(started_at) => {
                let elapsed = Local::now().signed_duration_since(started_at);
                elapsed.as_seconds_f64().max(0.0)
            }
            None => 0.0,
        };
        debug!(
            total = self.summary.total,
            duration = self.summary.duration,
            "session finished"
        );
    }

    fn outcome_reported(&mut self, event: &OutcomeEvent) {
        if !Self::is_authoritative(event) {
            return;
        }

        let name = event.short_name();
        let category = derive_category(name);
        let description = match &event.doc {
            Some(doc) if !doc.trim().is_empty() => doc.trim().to_owned(),
            _ => name.to_owned(),
        };
        let error_message = match (&event.outcome, &event.failure) {
            (TestOutcome::Failed, Some(failure)) => failure.long_text().to_owned(),
            _ => String::new(),
        };

        self.summary.record(event.outcome);
        self.categories
            .entry(category.clone())
            .or_default()
            .record(event.outcome);
        self.records.push(TestRecord {
            name: name.to_owned(),
            file: event.source_file().to_owned(),
            category,
            description,
            outcome: event.outcome,
            duration: event.duration,
            error_message,
        });
    }
}

/// Buckets a test into a category from its short name.
///
/// Assumes names of the shape `test_<category>_<rest>`: the category is the
/// word after `test_`, up to the next underscore (or the remainder of the name
/// if there is none). Names that don't match collapse to `"other"`. This is
/// best-effort bucketing, not a guarantee.
fn derive_category(short_name: &str) -> String {
    match short_name.strip_prefix("test_") {
        Some(rest) => {
            let category = rest.split('_').next().unwrap_or_default();
            if category.is_empty() {
                "other".to_owned()
            } else {
                category.to_owned()
            }
        }
        None => "other".to_owned(),
    }
}
