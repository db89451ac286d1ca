// Copyright (c) The testdash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the testdash binary: spawn it against a trivial
//! host runner and check the reports, the passthrough output, and the exit
//! code.

#![cfg(unix)]

use camino_tempfile::tempdir;
use duct::cmd;
use indoc::indoc;
use serde_json::Value;
use std::fs;

fn testdash_bin() -> &'static str {
    env!("CARGO_BIN_EXE_testdash")
}

#[test]
fn wraps_a_runner_and_writes_reports() {
    let dir = tempdir().expect("tempdir created");
    let html = dir.path().join("report.html");
    let json = dir.path().join("report.json");

    // A stand-in host runner: one human line, one event line, nonzero exit.
    let script = indoc! {r#"
        echo 'collected 1 item'
        echo '{"node_id":"tests/math.rs::test_addition","outcome":"passed","phase":"call","duration":0.01}'
        exit 3
    "#};

    let output = cmd!(
        testdash_bin(),
        "--runner",
        "sh",
        "--html",
        html.as_str(),
        "--json",
        json.as_str(),
        "--",
        "-c",
        script,
    )
    .stdout_capture()
    .unchecked()
    .run()
    .expect("testdash spawns");

    assert_eq!(
        output.status.code(),
        Some(3),
        "host runner exit code passes through"
    );

    let stdout = std::str::from_utf8(&output.stdout).expect("stdout is utf-8");
    assert!(
        stdout.contains("collected 1 item"),
        "runner output passes through untouched"
    );
    assert!(
        !stdout.contains("node_id"),
        "event lines are consumed, not echoed"
    );
    assert!(stdout.contains("Test Summary:"));
    assert!(stdout.contains("Total: 1"));

    // The report-generated lines show the absolute locations.
    let canonical_json = json.canonicalize_utf8().expect("JSON report exists");
    assert!(stdout.contains(canonical_json.as_str()));

    let doc: Value = serde_json::from_str(&fs::read_to_string(&json).expect("JSON report read"))
        .expect("JSON report parses");
    assert_eq!(doc["summary"]["total"], 1);
    assert_eq!(doc["summary"]["passed"], 1);
    assert_eq!(doc["tests"][0]["name"], "test_addition");
    assert_eq!(doc["categories"]["addition"]["passed"], 1);

    let page = fs::read_to_string(&html).expect("HTML report read");
    assert!(page.contains("test_addition"));
    assert!(page.contains("Test Report"));
}

#[test]
fn report_write_failure_maps_to_its_exit_code() {
    let output = cmd!(
        testdash_bin(),
        "--runner",
        "sh",
        "--html",
        "/nonexistent-testdash-dir/report.html",
        "--json",
        "/nonexistent-testdash-dir/report.json",
        "--",
        "-c",
        "true",
    )
    .stdout_capture()
    .stderr_capture()
    .unchecked()
    .run()
    .expect("testdash spawns");

    assert_eq!(output.status.code(), Some(102));
    let stderr = std::str::from_utf8(&output.stderr).expect("stderr is utf-8");
    assert!(
        stderr.contains("error writing HTML report"),
        "write failure is reported: {stderr}"
    );
}

#[test]
fn runner_spawn_failure_maps_to_its_exit_code() {
    let output = cmd!(testdash_bin(), "--runner", "/nonexistent-testdash-runner")
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()
        .expect("testdash spawns");

    assert_eq!(output.status.code(), Some(101));
    let stderr = std::str::from_utf8(&output.stderr).expect("stderr is utf-8");
    assert!(
        stderr.contains("error spawning host runner"),
        "spawn failure is reported: {stderr}"
    );
}
