// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors for sweep construction and job collections.

use jf_core::JobError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("no parameters added; call add_parameter first")]
    NoParameters,

    #[error("no setter added; call set_setter first")]
    NoSetter,

    #[error("parameter '{0}' has no values")]
    EmptyValues(String),

    #[error("invalid repeat count {0}; must be at least 1")]
    InvalidRepeat(u32),

    #[error("invalid path template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("invalid bounds for '{name}': [{min}, {max}]")]
    InvalidBounds { name: String, min: f64, max: f64 },

    /// Points of one parameter set must share the same parameter names.
    #[error("parameter point '{0}' does not match the names of the first point")]
    MismatchedParameters(String),

    #[error("duplicate parameter key '{0}'")]
    DuplicateKey(String),

    #[error("instance '{0}' already exists")]
    DuplicateName(String),

    /// Loading only ever fills an empty collection.
    #[error("job array already holds {0} jobs; load into an empty one")]
    NotEmpty(usize),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),

    #[error(transparent)]
    Job(#[from] JobError),
}

impl SweepError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SweepError::Io { path: path.as_ref().to_path_buf(), source }
    }
}
