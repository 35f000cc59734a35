// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use jf_core::JobStatus;
use jf_sweep::{JobArray, StatusCounts};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A job whose log ends in an ERROR marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedJob {
    pub dir: PathBuf,
    /// Step that was running when the job failed
    pub step: Option<String>,
}

/// Status summary of a sweep after a refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub root: PathBuf,
    pub total: usize,
    pub counts: StatusCounts,
    pub errors: Vec<FailedJob>,
}

impl StatusReport {
    /// Collect the report from a refreshed job array.
    pub fn new(jobs: &JobArray, counts: StatusCounts) -> Self {
        let errors = jobs
            .errors()
            .map(|job| FailedJob {
                dir: job.dir().to_path_buf(),
                step: job.current_step().map(|step| step.name.clone()),
            })
            .collect();
        Self { root: jobs.root().to_path_buf(), total: jobs.len(), counts, errors }
    }
}

fn label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "Pending",
        JobStatus::Running => "Running",
        JobStatus::Completed => "Completed",
        JobStatus::Error => "Error",
    }
}

/// Render `report` as text: totals, then failed jobs when `detail` is set.
pub fn format_text(report: &StatusReport, detail: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", color::header(&format!("Total jobs: {}", report.total)));

    let counts: Vec<String> = JobStatus::ALL
        .iter()
        .map(|&status| {
            let text = format!("{}: {}", label(status), report.counts[status]);
            if report.counts[status] > 0 {
                color::status(status, &text)
            } else {
                text
            }
        })
        .collect();
    let _ = writeln!(out, "{}", counts.join(", "));

    if detail {
        for failed in &report.errors {
            let _ = writeln!(
                out,
                "Job {} error at step {}",
                failed.dir.display(),
                failed.step.as_deref().unwrap_or("?")
            );
        }
    }
    out
}

pub fn print_report(report: &StatusReport, format: OutputFormat, detail: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_text(report, detail)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
