// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jf backup` is the command generated backup steps call.

use crate::prelude::*;

#[test]
fn backup_copies_files_into_named_dir() {
    let temp = Project::empty();
    temp.file("in.dat", "1 2 3");
    temp.file("sub/out.dat", "4");
    let dir = temp.path().to_str().unwrap();

    cli().args(&["backup", dir, "relax", "in.dat", "sub/out.dat"]).passes();

    assert_eq!(temp.read("relax/in.dat"), "1 2 3");
    assert_eq!(temp.read("relax/sub/out.dat"), "4");
}

#[test]
fn backup_missing_file_fails() {
    let temp = Project::empty();
    let dir = temp.path().to_str().unwrap();

    cli().args(&["backup", dir, "relax", "nope.dat"]).exits(1).stderr_has("nope.dat");
}

#[cfg(unix)]
#[test]
fn backup_step_runs_inside_composed_script() {
    let temp = Project::empty();
    temp.file("in.dat", "seed");
    let settings =
        JobSettings::default().backup_command(format!("{} backup", jf_bin().display()));
    let mut job = Job::new(temp.path(), &settings).unwrap();
    job.add_input("in.dat");
    job.add_program("prep", "true", true).unwrap();
    job.save().unwrap();
    let script = job.compose().unwrap();

    let status = std::process::Command::new("sh").arg(&script).status().unwrap();
    assert!(status.success());
    assert_eq!(temp.read("prep/in.dat"), "seed");
    assert_eq!(job.status().unwrap(), JobStatus::Completed);
}
