// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backup command handler, invoked by generated backup steps.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct BackupArgs {
    /// Job directory the files are relative to
    pub dir: PathBuf,

    /// Name of the backup directory under DIR
    pub name: String,

    /// Files to copy
    pub files: Vec<String>,
}

pub fn handle(args: BackupArgs) -> Result<()> {
    let copied = jf_core::backup::backup(&args.dir, &args.name, &args.files)?;
    tracing::debug!(dir = %args.dir.display(), name = %args.name, files = copied.len(), "backup done");
    Ok(())
}
