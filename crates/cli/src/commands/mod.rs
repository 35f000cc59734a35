// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod backup;
pub mod status;
pub mod submit;

use crate::exit_error::{ExitError, NOT_FOUND};
use anyhow::Result;
use jf_sweep::JobArray;
use std::path::Path;

/// Load the sweep saved under `root`, or fail with [`NOT_FOUND`] when it has
/// no manifest.
pub(crate) fn load_sweep(root: &Path, manifest: &str) -> Result<JobArray> {
    let mut jobs = JobArray::new(root).manifest_name(manifest);
    if !jobs.manifest_path().is_file() {
        return Err(ExitError::new(
            NOT_FOUND,
            format!("no sweep manifest at {}", jobs.manifest_path().display()),
        )
        .into());
    }
    jobs.load_all(None)?;
    Ok(jobs)
}
