// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for job definition, persistence, and submission.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by [`crate::Job`] operations.
///
/// Failures of the job script itself never show up here: they are only
/// observable as an ERROR status after re-reading the job log.
#[derive(Debug, Error)]
pub enum JobError {
    /// A step with this name is already part of the job.
    #[error("step '{0}' already exists")]
    DuplicateName(String),

    /// No program step with this name exists.
    #[error("no step named '{0}'")]
    NotFound(String),

    /// The job must be saved once before a script can be composed.
    #[error("job in {} must be saved before writing its submission script", .0.display())]
    NotSaved(PathBuf),

    /// The saved record was written by an incompatible version.
    #[error("unsupported job record version {found} (expected <= {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The configured submit command has no program to run.
    #[error("submit command is empty")]
    EmptySubmitCommand,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("job record {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The submit command could not be started.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A parameter setter rejected its input.
    #[error("setter failed: {0}")]
    Setter(String),
}

impl JobError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        JobError::Io { path: path.as_ref().to_path_buf(), source }
    }
}
