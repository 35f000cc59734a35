// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File copying that never follows symlinks.
//!
//! Used by generated backup steps (`jf backup <dir> <step> <files...>`) and
//! when cloning a template job into a new directory.

use crate::JobError;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy `src` to `dest`, recreating a symlink as a link instead of copying
/// its target. Parent directories of `dest` are created as needed.
pub fn copy_entry(src: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let meta = fs::symlink_metadata(src)?;
    if meta.file_type().is_symlink() {
        let target = fs::read_link(src)?;
        if fs::symlink_metadata(dest).is_ok() {
            fs::remove_file(dest)?;
        }
        link(&target, dest)
    } else {
        fs::copy(src, dest).map(|_| ())
    }
}

#[cfg(unix)]
fn link(target: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(not(unix))]
fn link(target: &Path, dest: &Path) -> std::io::Result<()> {
    fs::copy(target, dest).map(|_| ())
}

/// Copy each of `files` (relative to `dir`) into `dir/name/`.
///
/// Fails on the first file that cannot be copied, so a backup step with a
/// missing file exits non-zero and the job shows up as ERROR.
pub fn backup<S: AsRef<str>>(dir: &Path, name: &str, files: &[S]) -> Result<Vec<PathBuf>, JobError> {
    let bak_dir = dir.join(name);
    fs::create_dir_all(&bak_dir).map_err(|e| JobError::io(&bak_dir, e))?;

    let mut copied = Vec::with_capacity(files.len());
    for file in files {
        let src = dir.join(file.as_ref());
        let dest = bak_dir.join(file.as_ref());
        copy_entry(&src, &dest).map_err(|e| JobError::io(&src, e))?;
        tracing::debug!(src = %src.display(), dest = %dest.display(), "backed up file");
        copied.push(dest);
    }
    Ok(copied)
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
