// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.
//!
//! `cli()` runs the `jf` binary with no working directory set;
//! `Project::empty().jf()` runs it from inside a scratch directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

pub use jf_core::{Job, JobSettings, JobStatus};
pub use jf_sweep::JobArray;

/// The `jf` binary lives in the cli package, so this package's tests build it
/// into the shared target dir on first use.
static JF_BIN: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Some(path) = option_env!("CARGO_BIN_EXE_jf") {
        return PathBuf::from(path);
    }

    // target/<profile>/deps/specs-<hash>
    let exe = std::env::current_exe().unwrap();
    let profile_dir = exe.parent().and_then(Path::parent).unwrap().to_path_buf();

    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let mut build = Command::new(cargo);
    build
        .args(["build", "--quiet", "--package", "jf", "--bin", "jf"])
        .current_dir(env!("CARGO_MANIFEST_DIR"));
    if profile_dir.file_name().is_some_and(|name| name == "release") {
        build.arg("--release");
    }
    let status = build.status().unwrap();
    assert!(status.success(), "building jf failed: {status}");

    profile_dir.join(format!("jf{}", std::env::consts::EXE_SUFFIX))
});

/// Path of the built `jf` binary.
pub fn jf_bin() -> PathBuf {
    JF_BIN.clone()
}

pub fn cli() -> CliBuilder {
    CliBuilder::default()
}

#[derive(Default)]
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn pwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    fn run(self) -> (Option<i32>, RunAssert) {
        let mut cmd = assert_cmd::Command::new(jf_bin());
        cmd.args(&self.args).env("NO_COLOR", "1").env_remove("JF_LOG");
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        let output = cmd.output().unwrap();
        let assert = RunAssert {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        (output.status.code(), assert)
    }

    /// Run and require a zero exit status.
    pub fn passes(self) -> RunAssert {
        let (code, out) = self.run();
        assert_eq!(code, Some(0), "expected success\nstdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }

    /// Run and require a non-zero exit status.
    pub fn fails(self) -> RunAssert {
        let (code, out) = self.run();
        assert_ne!(code, Some(0), "expected failure\nstdout:\n{}", out.stdout);
        out
    }

    /// Run and require exactly `expected` as exit status.
    pub fn exits(self, expected: i32) -> RunAssert {
        let (code, out) = self.run();
        assert_eq!(code, Some(expected), "stdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }
}

pub struct RunAssert {
    pub stdout: String,
    pub stderr: String,
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// A scratch directory that may hold a saved sweep.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    /// Save a sweep of one two-step job per entry of `logs` (`None` = never
    /// started) under the project root.
    pub fn sweep(&self, logs: &[Option<&str>]) -> JobArray {
        let settings = JobSettings::default().submit_command("true");
        let jobs = logs
            .iter()
            .enumerate()
            .map(|(i, log)| {
                let mut job = Job::new(self.path().join(format!("A_x{i}")), &settings).unwrap();
                job.add_program("relax", "./relax", false).unwrap();
                job.add_program("md", "./md", false).unwrap();
                if let Some(log) = log {
                    self.file(&format!("A_x{i}/.log"), log);
                }
                job
            })
            .collect();
        let mut array = JobArray::from_jobs(self.path(), jobs);
        array.save_all().unwrap();
        array
    }

    pub fn jf(&self) -> CliBuilder {
        cli().pwd(self.path())
    }
}
