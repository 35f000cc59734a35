// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jf submit` reloads a sweep and hands its pending and failed jobs to the
//! submit command.

use crate::prelude::*;

#[test]
fn submit_composes_every_job() {
    let temp = Project::empty();
    temp.sweep(&[None, None]);

    temp.jf().args(&["submit"]).passes().stdout_has("Submitted 2 jobs");

    assert!(temp.path().join("A_x0/.job.sh").exists());
    assert!(temp.path().join("A_x1/.job.sh").exists());
}

#[test]
fn submit_resumes_failed_job_at_failed_step() {
    let temp = Project::empty();
    temp.sweep(&[Some("Starting job\n0: ./relax\nERROR on ./md\n")]);

    temp.jf().args(&["submit"]).passes();

    let script = temp.read("A_x0/.job.sh");
    assert!(script.contains("'1: ./md'"));
    assert!(!script.contains("'0: ./relax'"));
}

#[test]
fn submit_without_manifest_exits_not_found() {
    let temp = Project::empty();
    temp.jf().args(&["submit"]).exits(3);
}

#[test]
fn submit_skips_running_and_completed_jobs() {
    let temp = Project::empty();
    temp.sweep(&[
        Some("Starting job\n0: ./relax\n1: ./md\n"),
        Some("Starting job\n0: ./relax\n"),
        Some("Starting job\n0: ./relax\nERROR on ./md\n"),
        None,
    ]);

    temp.jf()
        .args(&["submit"])
        .passes()
        .stdout_has("Submitted 2 jobs")
        .stdout_has("Skipped 1 running and 1 completed jobs");

    assert!(!temp.path().join("A_x0/.job.sh").exists());
    assert!(!temp.path().join("A_x1/.job.sh").exists());
    assert!(temp.path().join("A_x2/.job.sh").exists());
    assert!(temp.path().join("A_x3/.job.sh").exists());
    assert_eq!(temp.read("A_x1/.log"), "Starting job\n0: ./relax\n");
}
