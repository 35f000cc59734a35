// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status command handler

use anyhow::Result;
use clap::Args;
use jf_sweep::DEFAULT_MANIFEST_NAME;
use std::path::PathBuf;

use crate::output::{print_report, OutputFormat, StatusReport};

/// File under the sweep root listing the directories of failed jobs.
pub const DEFAULT_ERROR_FILE: &str = "error.txt";

#[derive(Args)]
pub struct StatusArgs {
    /// Sweep root directory
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Manifest file name under ROOT
    #[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
    pub manifest: String,

    /// File under ROOT that receives the directories of failed jobs
    #[arg(long, default_value = DEFAULT_ERROR_FILE)]
    pub errors: String,

    /// Only print totals, not the failed jobs
    #[arg(short, long)]
    pub quiet: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Refresh every job from its log, print the report, record failed jobs and
/// save the refreshed records.
pub fn handle(args: StatusArgs) -> Result<()> {
    let mut jobs = super::load_sweep(&args.root, &args.manifest)?;
    jobs.refresh()?;

    let report = StatusReport::new(&jobs, jobs.counts());
    print_report(&report, args.format, !args.quiet)?;

    if let Some(path) = jobs.logerror(&args.errors)? {
        tracing::info!(path = %path.display(), failed = report.errors.len(), "wrote error list");
    }
    jobs.save_all()?;
    Ok(())
}
