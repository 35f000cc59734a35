// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable collection of the jobs of one sweep.
//!
//! The manifest lists one job directory per line; each directory holds the
//! job's own record. Reloading a collection therefore only needs its root.

use crate::SweepError;
use jf_core::settings::DEFAULT_SAVE_NAME;
use jf_core::{Job, JobStatus};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::ops::Index;
use std::path::{Path, PathBuf};

/// Default manifest file name under the collection root.
pub const DEFAULT_MANIFEST_NAME: &str = "jobarray.json";

/// Number of jobs in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub running: usize,
    pub completed: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: JobStatus) {
        match status {
            JobStatus::Pending => self.pending += 1,
            JobStatus::Running => self.running += 1,
            JobStatus::Completed => self.completed += 1,
            JobStatus::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.running + self.completed + self.error
    }
}

impl Index<JobStatus> for StatusCounts {
    type Output = usize;

    fn index(&self, status: JobStatus) -> &usize {
        match status {
            JobStatus::Pending => &self.pending,
            JobStatus::Running => &self.running,
            JobStatus::Completed => &self.completed,
            JobStatus::Error => &self.error,
        }
    }
}

impl FromIterator<JobStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = JobStatus>>(iter: I) -> Self {
        let mut counts = Self::default();
        for status in iter {
            counts.add(status);
        }
        counts
    }
}

impl std::fmt::Display for StatusCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pending: {}, Running: {}, Completed: {}, Error: {}",
            self.pending, self.running, self.completed, self.error
        )
    }
}

/// Jobs of a sweep rooted at one directory.
#[derive(Debug, Clone)]
pub struct JobArray {
    root: PathBuf,
    jobs: Vec<Job>,
    job_save: String,
    manifest_name: String,
}

impl JobArray {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            jobs: Vec::new(),
            job_save: DEFAULT_SAVE_NAME.to_string(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
        }
    }

    /// A collection over existing jobs; every job is given the collection's
    /// record file name.
    pub fn from_jobs(root: impl Into<PathBuf>, jobs: Vec<Job>) -> Self {
        let mut array = Self::new(root);
        array.jobs = jobs;
        array.stamp_save_names();
        array
    }

    /// Record file name used for every job (default `job.json`).
    pub fn job_save(mut self, name: impl Into<String>) -> Self {
        self.job_save = name.into();
        self.stamp_save_names();
        self
    }

    pub fn manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    fn stamp_save_names(&mut self) {
        for job in &mut self.jobs {
            job.set_save_name(self.job_save.as_str());
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest_name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Write the manifest, then every job record.
    pub fn save_all(&mut self) -> Result<&mut Self, SweepError> {
        fs::create_dir_all(&self.root).map_err(|e| SweepError::io(&self.root, e))?;
        let manifest: String =
            self.jobs.iter().map(|job| format!("{}\n", job.dir().display())).collect();
        let path = self.manifest_path();
        fs::write(&path, manifest).map_err(|e| SweepError::io(&path, e))?;

        for job in &mut self.jobs {
            job.save_as(self.job_save.as_str())?;
        }
        tracing::info!(manifest = %path.display(), jobs = self.jobs.len(), "saved job array");
        Ok(self)
    }

    /// Read the manifest (default name when `manifest` is `None`) and every
    /// job record it lists.
    ///
    /// Fails with [`SweepError::NotEmpty`] if the collection already holds
    /// jobs; nothing is changed on any failure.
    pub fn load_all(&mut self, manifest: Option<&Path>) -> Result<&mut Self, SweepError> {
        if !self.jobs.is_empty() {
            return Err(SweepError::NotEmpty(self.jobs.len()));
        }
        let path = match manifest {
            Some(name) => self.root.join(name),
            None => self.manifest_path(),
        };
        let content = fs::read_to_string(&path).map_err(|e| SweepError::io(&path, e))?;

        let mut jobs = Vec::new();
        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let record = self.root.join(line).join(&self.job_save);
            jobs.push(Job::load_record(&record)?);
        }
        tracing::info!(manifest = %path.display(), jobs = jobs.len(), "loaded job array");
        self.jobs = jobs;
        Ok(self)
    }

    /// Re-read every job's log.
    pub fn refresh(&mut self) -> Result<&mut Self, SweepError> {
        for job in &mut self.jobs {
            job.read_status()?;
        }
        Ok(self)
    }

    /// Save everything, then submit each job in order. Returns the number of
    /// jobs submitted.
    pub fn submit(&mut self) -> Result<usize, SweepError> {
        self.submit_where(|_| true)
    }

    /// Save everything, then submit the jobs accepted by `filter` in order.
    ///
    /// Submit clients are reaped once all of them have been spawned. A client
    /// exiting non-zero is logged; the job it handed over is still counted.
    pub fn submit_where<F>(&mut self, mut filter: F) -> Result<usize, SweepError>
    where
        F: FnMut(&Job) -> bool,
    {
        self.save_all()?;

        let mut clients = Vec::new();
        let mut spawn_error = None;
        for job in &mut self.jobs {
            if !filter(job) {
                continue;
            }
            match job.submit() {
                Ok(child) => clients.push((job.dir().to_path_buf(), child)),
                Err(e) => {
                    spawn_error = Some(e);
                    break;
                }
            }
        }

        let submitted = clients.len();
        for (dir, mut child) in clients {
            match child.wait() {
                Ok(status) if !status.success() => {
                    tracing::warn!(dir = %dir.display(), %status, "submit command failed");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "could not wait on submit command");
                }
            }
        }
        if let Some(e) = spawn_error {
            return Err(e.into());
        }

        tracing::info!(root = %self.root.display(), submitted, jobs = self.jobs.len(), "submitted job array");
        Ok(submitted)
    }

    /// Refresh and tally statuses, printing to stdout at `verbosity >= 1`.
    pub fn report(&mut self, verbosity: u8) -> Result<StatusCounts, SweepError> {
        let stdout = std::io::stdout();
        self.report_to(verbosity, &mut stdout.lock())
    }

    /// Refresh and tally statuses.
    ///
    /// At verbosity 1 the totals are written to `out`; at 2 also the
    /// directory and failing step of every ERROR job.
    pub fn report_to<W: Write>(
        &mut self,
        verbosity: u8,
        out: &mut W,
    ) -> Result<StatusCounts, SweepError> {
        self.refresh()?;
        let counts = self.counts();

        if verbosity >= 1 {
            writeln!(out, "Total jobs: {}", self.jobs.len()).map_err(SweepError::Report)?;
            writeln!(out, "{counts}").map_err(SweepError::Report)?;
        }
        if verbosity >= 2 {
            for job in self.errors() {
                let step = job.current_step().map_or("?", |step| step.name.as_str());
                writeln!(out, "Job {} error at step {}", job.dir().display(), step)
                    .map_err(SweepError::Report)?;
            }
        }
        Ok(counts)
    }

    /// Status tally as of the last refresh.
    pub fn counts(&self) -> StatusCounts {
        self.jobs.iter().map(Job::report).collect()
    }

    /// Jobs whose last refresh ended in ERROR.
    pub fn errors(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|job| job.report() == JobStatus::Error)
    }

    /// Write the directory of every ERROR job to `file` under the root.
    ///
    /// Returns the written path, or `None` (and writes nothing) when no job
    /// failed.
    pub fn logerror(&self, file: impl AsRef<Path>) -> Result<Option<PathBuf>, SweepError> {
        let lines: String = self.errors().map(|job| format!("{}\n", job.dir().display())).collect();
        if lines.is_empty() {
            return Ok(None);
        }
        let path = self.root.join(file);
        fs::write(&path, lines).map_err(|e| SweepError::io(&path, e))?;
        tracing::warn!(path = %path.display(), "recorded failed jobs");
        Ok(Some(path))
    }
}

impl<'a> IntoIterator for &'a JobArray {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

#[cfg(test)]
#[path = "job_array_tests.rs"]
mod tests;
