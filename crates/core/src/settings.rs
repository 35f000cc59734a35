// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job configuration handed to [`crate::Job::new`].

use crate::env;
use std::path::PathBuf;

pub const DEFAULT_SCRIPT_NAME: &str = ".job.sh";
pub const DEFAULT_LOG_NAME: &str = ".log";
pub const DEFAULT_SAVE_NAME: &str = "job.json";
pub const DEFAULT_SUBMIT_COMMAND: &str = "qsub";
pub const DEFAULT_BACKUP_COMMAND: &str = "jf backup";

/// File names and external commands a new job starts with.
///
/// Every job carries its own copy, so two sweeps in one process can target
/// different schedulers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSettings {
    pub script_name: String,
    pub log_name: String,
    pub submit_command: String,
    pub backup_command: String,
    pub submit_template: Option<PathBuf>,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            log_name: DEFAULT_LOG_NAME.to_string(),
            submit_command: DEFAULT_SUBMIT_COMMAND.to_string(),
            backup_command: DEFAULT_BACKUP_COMMAND.to_string(),
            submit_template: None,
        }
    }
}

impl JobSettings {
    /// Defaults overridden by `JF_SUBMIT_CMD`, `JF_BACKUP_CMD`,
    /// `JF_SCRIPT_NAME` and `JF_LOG_NAME` when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            script_name: env::script_name().unwrap_or(defaults.script_name),
            log_name: env::log_name().unwrap_or(defaults.log_name),
            submit_command: env::submit_command().unwrap_or(defaults.submit_command),
            backup_command: env::backup_command().unwrap_or(defaults.backup_command),
            submit_template: None,
        }
    }

    crate::setters! {
        into {
            script_name: String,
            log_name: String,
            submit_command: String,
            backup_command: String,
        }
        option {
            submit_template: PathBuf,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
