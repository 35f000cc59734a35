// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job status as observed from the job log.

use serde::{Deserialize, Serialize};

/// Observed state of a submitted job.
///
/// Jobs never move between these states on their own account: every
/// transition is the job script appending to its log out of process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// No step has completed and the log shows no activity.
    Pending,
    /// Some steps are done, or the script has started.
    Running,
    /// Every step has logged completion.
    Completed,
    /// The last log line is an ERROR marker.
    Error,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] =
        [JobStatus::Pending, JobStatus::Running, JobStatus::Completed, JobStatus::Error];

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Error => "error",
    }
}
