// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end checks: drive an aggregator through a session and read the
//! report files back.

use camino_tempfile::tempdir;
use pretty_assertions::assert_eq;
use serde_json::Value;
use testdash_reporter::{
    errors::WriteReportError,
    reporter::{
        FailureDetail, HtmlReport, JsonReport, OutcomeEvent, Phase, ResultAggregator,
        SessionListener, TestOutcome,
    },
};

fn event(node_id: &str, outcome: TestOutcome, phase: Phase) -> OutcomeEvent {
    OutcomeEvent {
        node_id: node_id.to_owned(),
        outcome,
        phase,
        duration: 0.05,
        doc: None,
        failure: None,
    }
}

fn run_session() -> ResultAggregator {
    let mut aggregator = ResultAggregator::new();
    aggregator.session_started();
    aggregator.outcome_reported(&event(
        "tests/math.rs::test_addition",
        TestOutcome::Passed,
        Phase::Call,
    ));
    aggregator.outcome_reported(&OutcomeEvent {
        failure: Some(FailureDetail::Message("AssertionError".to_owned())),
        ..event(
            "tests/api.rs::test_create_user_bad",
            TestOutcome::Failed,
            Phase::Call,
        )
    });
    aggregator.outcome_reported(&event(
        "tests/api.rs::test_advanced_feature",
        TestOutcome::Skipped,
        Phase::Setup,
    ));
    aggregator.session_finished();
    aggregator
}

#[test]
fn json_report_round_trips_through_a_file() {
    let aggregator = run_session();
    let dir = tempdir().expect("tempdir created");
    let path = dir.path().join("test_report.json");

    let rendered = JsonReport::new(&aggregator)
        .save(&path)
        .expect("report written");
    let on_disk = std::fs::read_to_string(&path).expect("report read back");
    assert_eq!(rendered, on_disk);

    let doc: Value = serde_json::from_str(&on_disk).expect("report parses");
    assert_eq!(doc["summary"]["total"], 3);
    assert_eq!(doc["summary"]["passed"], 1);
    assert_eq!(doc["summary"]["failed"], 1);
    assert_eq!(doc["summary"]["skipped"], 1);
    assert_eq!(doc["summary"]["error"], 0);
    assert_eq!(doc["categories"]["addition"]["passed"], 1);
    assert_eq!(doc["categories"]["create"]["failed"], 1);
    assert_eq!(doc["categories"]["advanced"]["skipped"], 1);
    assert_eq!(doc["tests"][1]["error_message"], "AssertionError");
}

#[test]
fn html_report_embeds_every_record() {
    let aggregator = run_session();
    let dir = tempdir().expect("tempdir created");
    let path = dir.path().join("test_report.html");

    let rendered = HtmlReport::new(&aggregator, "API Test Report")
        .save(&path)
        .expect("report written");
    let on_disk = std::fs::read_to_string(&path).expect("report read back");
    assert_eq!(rendered, on_disk);

    assert!(on_disk.contains("API Test Report"));
    for name in ["test_addition", "test_create_user_bad", "test_advanced_feature"] {
        assert!(on_disk.contains(name), "record {name} embedded in the page");
    }
    // Record order in the payload matches first-recorded order.
    let addition = on_disk.find("test_addition").expect("first record");
    let create = on_disk.find("test_create_user_bad").expect("second record");
    assert!(addition < create);
}

#[test]
fn write_failures_propagate() {
    let aggregator = run_session();
    let dir = tempdir().expect("tempdir created");
    // Writing to the directory itself fails.
    let error = JsonReport::new(&aggregator)
        .save(dir.path())
        .expect_err("writing to a directory fails");
    assert!(matches!(error, WriteReportError::Io { .. }));
    assert!(error.to_string().contains("JSON report"));
}

#[test]
fn reports_can_be_generated_mid_run() {
    let mut aggregator = ResultAggregator::new();
    aggregator.session_started();
    aggregator.outcome_reported(&event(
        "tests/math.rs::test_addition",
        TestOutcome::Passed,
        Phase::Call,
    ));

    // No session_finished yet.
    let rendered = JsonReport::new(&aggregator)
        .to_string_pretty()
        .expect("report renders mid-run");
    let doc: Value = serde_json::from_str(&rendered).expect("report parses");
    assert_eq!(doc["summary"]["total"], 1);
    assert_eq!(doc["summary"]["duration"], 0.0);
}
