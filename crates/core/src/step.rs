// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job steps and shell quoting helpers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// Name prefix of the synthetic step that archives files after step `name`.
pub const BACKUP_PREFIX: &str = "bak_";

/// Name of the backup step generated for `step`.
pub fn backup_name(step: &str) -> String {
    format!("{BACKUP_PREFIX}{step}")
}

/// What a step runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    /// A user supplied shell command.
    Program { command: String },
    /// Copy `files` into `<dir>/<of>/` through the backup collaborator.
    ///
    /// Rendered at compose time so the command always names the job's
    /// current directory.
    Backup { of: String, files: Vec<String> },
}

/// One named entry in a job's ordered step list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(flatten)]
    pub action: StepAction,
}

impl Step {
    pub fn program(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self { name: name.into(), action: StepAction::Program { command: command.into() } }
    }

    pub fn backup(of: impl Into<String>, files: Vec<String>) -> Self {
        let of = of.into();
        Self { name: backup_name(&of), action: StepAction::Backup { of, files } }
    }

    pub fn is_backup(&self) -> bool {
        matches!(self.action, StepAction::Backup { .. })
    }

    /// Whether this is the backup step generated for `step`.
    pub fn is_backup_of(&self, step: &str) -> bool {
        matches!(&self.action, StepAction::Backup { of, .. } if of == step)
    }

    /// Shell command line for this step in a job living in `dir`.
    pub fn command(&self, dir: &Path, backup_command: &str) -> String {
        match &self.action {
            StepAction::Program { command } => command.clone(),
            StepAction::Backup { of, files } => {
                let mut line = format!(
                    "{} {} {}",
                    backup_command,
                    shell_quote(&dir.display().to_string()),
                    shell_quote(of)
                );
                for file in files {
                    line.push(' ');
                    line.push_str(&shell_quote(file));
                }
                line
            }
        }
    }
}

/// Quote `s` for a POSIX shell only when it contains characters the shell
/// would interpret.
pub fn shell_quote(s: &str) -> Cow<'_, str> {
    let safe = !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || "_-./,:=+@%".contains(c));
    if safe {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(single_quote(s))
    }
}

/// Wrap `s` in single quotes, escaping embedded quotes with the `'\''` idiom.
pub fn single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
