// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events emitted by a host test runner.

use serde::{Deserialize, Serialize};

/// The final status of one executed test phase.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    /// The test phase completed successfully.
    Passed,
    /// The test phase ran to completion and reported a failure.
    Failed,
    /// The test was skipped before or during execution.
    Skipped,
    /// The test phase aborted with an error outside the test body itself.
    Error,
}

impl TestOutcome {
    /// Returns the lowercase tag for this outcome, as it appears on the wire
    /// and in report documents.
    pub fn as_str(self) -> &'static str {
        match self {
            TestOutcome::Passed => "passed",
            TestOutcome::Failed => "failed",
            TestOutcome::Skipped => "skipped",
            TestOutcome::Error => "error",
        }
    }

    /// Returns the string values of all known variants.
    pub fn variants() -> &'static [&'static str] {
        &["passed", "failed", "skipped", "error"]
    }
}

impl std::fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The execution phase an [`OutcomeEvent`] was reported from.
///
/// A host runner reports up to three events per test, one per phase. The
/// aggregator picks a single authoritative event out of these; see
/// [`ResultAggregator`](crate::reporter::ResultAggregator).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Fixture and environment preparation before the test body runs.
    Setup,
    /// The test body itself.
    Call,
    /// Cleanup after the test body.
    Teardown,
}

/// A failure representation attached to an [`OutcomeEvent`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FailureDetail {
    /// A structured failure location with a designated long-text component.
    Location {
        /// The file the failure was reported from.
        file: String,
        /// The line the failure was reported from.
        line: u64,
        /// The long-form failure text.
        message: String,
    },
    /// A free-form failure message.
    Message(String),
}

impl FailureDetail {
    /// Returns the long-text component of this representation.
    pub fn long_text(&self) -> &str {
        match self {
            FailureDetail::Location { message, .. } => message,
            FailureDetail::Message(message) => message,
        }
    }
}

/// A per-test outcome report emitted by the host runner.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OutcomeEvent {
    /// The qualified test identifier, e.g. `tests/api.rs::test_create_user`.
    ///
    /// Segments are separated by `::`; the first segment names the originating
    /// file and the last segment names the test itself. An identifier without
    /// separators serves as both.
    pub node_id: String,

    /// The outcome of this phase.
    pub outcome: TestOutcome,

    /// The phase this event was reported from.
    pub phase: Phase,

    /// Time taken by this phase, in seconds.
    #[serde(default)]
    pub duration: f64,

    /// The test's documentation text, if the host runner captured one.
    #[serde(default)]
    pub doc: Option<String>,

    /// A failure representation, present for failed or errored phases.
    #[serde(default)]
    pub failure: Option<FailureDetail>,
}

impl OutcomeEvent {
    /// Returns the test's short name: the segment after the last `::`.
    pub fn short_name(&self) -> &str {
        match self.node_id.rsplit_once("::") {
            Some((_, name)) => name,
            None => &self.node_id,
        }
    }

    /// Returns the originating file path: the segment before the first `::`.
    pub fn source_file(&self) -> &str {
        match self.node_id.split_once("::") {
            Some((file, _)) => file,
            None => &self.node_id,
        }
    }
}

/// Lifecycle callbacks invoked by a host test runner.
///
/// The host calls [`session_started`](Self::session_started) once, then
/// [`outcome_reported`](Self::outcome_reported) for every phase of every
/// executed test, then [`session_finished`](Self::session_finished) once.
/// Calls are sequential on one thread; a listener embedded in a concurrent
/// host needs external synchronization.
pub trait SessionListener {
    /// The test session started.
    fn session_started(&mut self);

    /// The host runner reported the outcome of one test phase.
    fn outcome_reported(&mut self, event: &OutcomeEvent);

    /// The test session finished. Must not alter the host's own exit status.
    fn session_finished(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn node_id_segments() {
        let event = make_event("tests/api.rs::TestUsers::test_create_user");
        assert_eq!(event.short_name(), "test_create_user");
        assert_eq!(event.source_file(), "tests/api.rs");

        let bare = make_event("helper_check");
        assert_eq!(bare.short_name(), "helper_check");
        assert_eq!(bare.source_file(), "helper_check");
    }

    #[test]
    fn deserialize_minimal_event() {
        let event: OutcomeEvent = serde_json::from_str(indoc! {r#"
            {
                "node_id": "tests/api.rs::test_addition",
                "outcome": "passed",
                "phase": "call"
            }
        "#})
        .expect("minimal event deserializes");
        assert_eq!(event.outcome, TestOutcome::Passed);
        assert_eq!(event.phase, Phase::Call);
        assert_eq!(event.duration, 0.0);
        assert_eq!(event.doc, None);
        assert_eq!(event.failure, None);
    }

    #[test]
    fn deserialize_failure_representations() {
        let event: OutcomeEvent = serde_json::from_str(indoc! {r#"
            {
                "node_id": "tests/api.rs::test_create_user_bad",
                "outcome": "failed",
                "phase": "call",
                "duration": 0.25,
                "failure": "AssertionError"
            }
        "#})
        .expect("string failure deserializes");
        assert_eq!(
            event.failure.as_ref().map(FailureDetail::long_text),
            Some("AssertionError")
        );

        let event: OutcomeEvent = serde_json::from_str(indoc! {r#"
            {
                "node_id": "tests/api.rs::test_create_user_bad",
                "outcome": "failed",
                "phase": "call",
                "failure": {
                    "file": "tests/api.rs",
                    "line": 42,
                    "message": "assertion failed: left != right"
                }
            }
        "#})
        .expect("structured failure deserializes");
        assert_eq!(
            event.failure.as_ref().map(FailureDetail::long_text),
            Some("assertion failed: left != right")
        );
    }

    #[test]
    fn unknown_outcome_tag_is_rejected() {
        let result: Result<OutcomeEvent, _> = serde_json::from_str(
            r#"{"node_id": "t::test_x", "outcome": "exploded", "phase": "call"}"#,
        );
        assert!(result.is_err(), "unknown outcome tags do not deserialize");
    }

    fn make_event(node_id: &str) -> OutcomeEvent {
        OutcomeEvent {
            node_id: node_id.to_owned(),
            outcome: TestOutcome::Passed,
            phase: Phase::Call,
            duration: 0.0,
            doc: None,
            failure: None,
        }
    }
}
