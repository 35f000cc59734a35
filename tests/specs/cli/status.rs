// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jf status` reports a saved sweep from its job logs.

use crate::prelude::*;

const DONE: &str = "Starting job\n0: ./relax\n1: ./md\n";
const FAILED: &str = "Starting job\n0: ./relax\nERROR on ./md\n";

#[test]
fn status_reports_counts_and_failed_jobs() {
    let temp = Project::empty();
    temp.sweep(&[Some(DONE), Some(FAILED), None]);

    temp.jf()
        .args(&["status"])
        .passes()
        .stdout_has("Total jobs: 3")
        .stdout_has("Pending: 1, Running: 0, Completed: 1, Error: 1")
        .stdout_has("A_x1 error at step md");

    let errors = temp.read("error.txt");
    assert_eq!(errors, format!("{}\n", temp.path().join("A_x1").display()));
}

#[test]
fn status_accepts_root_argument() {
    let temp = Project::empty();
    temp.sweep(&[Some(DONE)]);

    cli()
        .args(&["status", temp.path().to_str().unwrap()])
        .passes()
        .stdout_has("Completed: 1");
    assert!(!temp.path().join("error.txt").exists());
}

#[test]
fn status_quiet_hides_failed_jobs() {
    let temp = Project::empty();
    temp.sweep(&[Some(FAILED)]);

    temp.jf()
        .args(&["status", "--quiet"])
        .passes()
        .stdout_has("Error: 1")
        .stdout_lacks("error at step");
}

#[test]
fn status_json_format() {
    let temp = Project::empty();
    temp.sweep(&[Some(DONE), Some("0: ./relax\n")]);

    let out = temp.jf().args(&["status", "--format", "json"]).passes();
    let report = out.stdout_json();
    assert_eq!(report["total"], 2);
    assert_eq!(report["counts"]["completed"], 1);
    assert_eq!(report["counts"]["running"], 1);
    assert_eq!(report["errors"], serde_json::json!([]));
}

#[test]
fn status_saves_refreshed_records() {
    let temp = Project::empty();
    temp.sweep(&[Some("0: ./relax\n")]);

    temp.jf().args(&["status"]).passes();

    let job = Job::load_record(temp.path().join("A_x0/job.json")).unwrap();
    assert_eq!(job.cur_state(), 1);
    assert!(job.is_running());
}

#[test]
fn status_custom_error_file() {
    let temp = Project::empty();
    temp.sweep(&[Some(FAILED)]);

    temp.jf().args(&["status", "--errors", "failed.txt"]).passes();
    assert!(temp.path().join("failed.txt").exists());
    assert!(!temp.path().join("error.txt").exists());
}

#[test]
fn status_without_manifest_exits_not_found() {
    let temp = Project::empty();
    temp.jf().args(&["status"]).exits(3).stderr_has("no sweep manifest");
}
