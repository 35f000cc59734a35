// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submit command handler

use anyhow::Result;
use clap::Args;
use jf_core::{Job, JobStatus};
use jf_sweep::{StatusCounts, DEFAULT_MANIFEST_NAME};
use std::path::PathBuf;

#[derive(Args)]
pub struct SubmitArgs {
    /// Sweep root directory
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Manifest file name under ROOT
    #[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
    pub manifest: String,
}

/// Jobs that have not started or whose last run failed.
fn needs_submit(status: JobStatus) -> bool {
    matches!(status, JobStatus::Pending | JobStatus::Error)
}

/// Reload a saved sweep and submit its pending and failed jobs.
///
/// Scripts are composed from each job's log, so failed jobs resume at the
/// step that failed. Running and completed jobs are left alone.
pub fn handle(args: SubmitArgs) -> Result<()> {
    let mut jobs = super::load_sweep(&args.root, &args.manifest)?;
    jobs.refresh()?;

    let skipped: StatusCounts =
        jobs.iter().map(Job::report).filter(|&status| !needs_submit(status)).collect();
    let submitted = jobs.submit_where(|job| needs_submit(job.report()))?;

    println!("Submitted {submitted} jobs from {}", args.root.display());
    if skipped.total() > 0 {
        tracing::info!(running = skipped.running, completed = skipped.completed, "skipped jobs");
        println!("Skipped {} running and {} completed jobs", skipped.running, skipped.completed);
    }
    Ok(())
}
