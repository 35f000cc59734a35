// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

/// Scheduler submission command (default `qsub`).
pub const SUBMIT_CMD: &str = "JF_SUBMIT_CMD";
/// Command generated backup steps invoke (default `jf backup`).
pub const BACKUP_CMD: &str = "JF_BACKUP_CMD";
/// File name of the per-job script (default `.job.sh`).
pub const SCRIPT_NAME: &str = "JF_SCRIPT_NAME";
/// File name of the per-job log (default `.log`).
pub const LOG_NAME: &str = "JF_LOG_NAME";
/// Tracing filter directive for the `jf` binary (default `warn`).
pub const LOG: &str = "JF_LOG";

/// Non-empty value of an environment variable.
fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn submit_command() -> Option<String> {
    non_empty(SUBMIT_CMD)
}

pub fn backup_command() -> Option<String> {
    non_empty(BACKUP_CMD)
}

pub fn script_name() -> Option<String> {
    non_empty(SCRIPT_NAME)
}

pub fn log_name() -> Option<String> {
    non_empty(LOG_NAME)
}
