// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser for the append-only job log.
//!
//! The job script appends `"<index>: <command>"` after each step succeeds and
//! `"ERROR on <command>"` when one fails. The log may be read while the script
//! is still writing to it, so a final line without a trailing newline is
//! treated as an in-progress write and never interpreted.

use std::io::ErrorKind;
use std::path::Path;

/// First token of the line the script appends when a step fails.
pub const ERROR_MARKER: &str = "ERROR";

/// What the log says about a job's progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSummary {
    /// Index of the step on the last completion line, if any.
    pub last_completed: Option<usize>,
    /// The last complete, non-blank line is an ERROR marker.
    pub error: bool,
    /// The log ends in a partially written line.
    pub tail_incomplete: bool,
}

impl LogSummary {
    /// Number of completed steps, i.e. the resumption offset.
    pub fn completed_steps(&self) -> usize {
        self.last_completed.map_or(0, |index| index + 1)
    }
}

/// Step index of a `"<index>: <text>"` completion line.
pub fn parse_step_line(line: &str) -> Option<usize> {
    let (index, _) = line.split_once(':')?;
    let index = index.trim();
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    index.parse().ok()
}

fn is_error_line(line: &str) -> bool {
    line.split_whitespace().next() == Some(ERROR_MARKER)
}

/// Summarize log content.
///
/// The last completion line wins; lines are expected to be monotonically
/// increasing but this is not enforced.
pub fn parse_log(content: &str) -> LogSummary {
    let mut summary = LogSummary::default();
    let mut lines: Vec<&str> = content.split('\n').collect();

    // split leaves either "" after a final newline or the partial tail
    if let Some(tail) = lines.pop() {
        summary.tail_incomplete = !tail.trim().is_empty();
    }

    let mut last_line = None;
    for line in lines {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if let Some(index) = parse_step_line(line) {
            summary.last_completed = Some(index);
        }
        last_line = Some(line);
    }
    summary.error = last_line.is_some_and(is_error_line);
    summary
}

/// Read and summarize the log at `path`; `Ok(None)` when it does not exist.
pub fn read_log(path: &Path) -> std::io::Result<Option<LogSummary>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(parse_log(&String::from_utf8_lossy(&bytes)))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
