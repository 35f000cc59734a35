// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, JobSettings};
use std::path::Path;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job state types.
pub mod strategies {
    use crate::{JobStatus, ParamValue};
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::Running),
            Just(JobStatus::Completed),
            Just(JobStatus::Error),
        ]
    }

    pub fn arb_param_value() -> impl Strategy<Value = ParamValue> {
        prop_oneof![
            any::<i64>().prop_map(ParamValue::Int),
            (-1e6f64..1e6).prop_map(ParamValue::Float),
            "[a-z]{1,6}".prop_map(ParamValue::Text),
        ]
    }

    /// Log lines a job script can leave behind, including a failure marker.
    pub fn arb_log_line(max_step: usize) -> impl Strategy<Value = String> {
        prop_oneof![
            (0..=max_step).prop_map(|i| format!("{i}: step")),
            Just("Starting job /tmp/x at step 0".to_string()),
            Just("ERROR on step".to_string()),
        ]
    }
}

// ── Job fixtures ─────────────────────────────────────────────────────────

/// Default settings with a submit command that succeeds without a scheduler.
pub fn test_settings() -> JobSettings {
    JobSettings::default().submit_command("true")
}

/// A job in `dir` with program steps named after `steps`.
pub fn job_with_steps(dir: &Path, steps: &[&str]) -> Job {
    let mut job = Job::new(dir, &test_settings()).unwrap_or_else(|e| panic!("job: {e}"));
    for name in steps {
        job.add_program(name, &format!("./{name}"), false)
            .unwrap_or_else(|e| panic!("add {name}: {e}"));
    }
    job
}

/// Overwrite the job log with `content`.
pub fn write_log(job: &Job, content: &str) {
    let path = job.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir: {e}"));
    }
    std::fs::write(&path, content).unwrap_or_else(|e| panic!("write log: {e}"));
}
