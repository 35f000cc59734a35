// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record and state machine.
//!
//! A job is a directory, an ordered list of steps, and a log. The job script
//! runs out of process and appends to the log as steps finish; this side only
//! composes the script, submits it, and re-reads the log to learn where the
//! job is.

use crate::backup::copy_entry;
use crate::log::read_log;
use crate::settings::{JobSettings, DEFAULT_SAVE_NAME};
use crate::step::Step;
use crate::{script, JobError, JobStatus};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

/// Schema version written to every job record.
pub const CURRENT_JOB_VERSION: u32 = 1;

/// A single job of a sweep.
///
/// Serialized as one JSON record per job directory. File names are stored
/// relative to `dir`, so every derived path stays rooted under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Schema version for compatibility checks
    #[serde(rename = "v")]
    version: u32,
    /// Absolute job directory
    dir: PathBuf,
    steps: Vec<Step>,
    /// Steps `[0, cur_state)` have completed
    cur_state: usize,
    #[serde(default)]
    running: bool,
    #[serde(default)]
    error_exit: bool,
    /// The last log read ended in a partially written line
    #[serde(default)]
    tail_incomplete: bool,
    #[serde(default)]
    input: Vec<String>,
    #[serde(default)]
    output: Vec<String>,
    #[serde(default)]
    checkpoint: Vec<String>,
    script_name: String,
    log_name: String,
    /// Record file name; `None` until the first save
    #[serde(default)]
    save_name: Option<String>,
    submit_command: String,
    #[serde(default)]
    submit_template: Option<PathBuf>,
    backup_command: String,
}

fn absolute(path: &Path) -> Result<PathBuf, JobError> {
    std::path::absolute(path).map_err(|e| JobError::io(path, e))
}

fn push_unique(list: &mut Vec<String>, file: String) {
    if !list.contains(&file) {
        list.push(file);
    }
}

impl Job {
    /// Create an empty job rooted at `dir` (made absolute).
    pub fn new(dir: impl AsRef<Path>, settings: &JobSettings) -> Result<Self, JobError> {
        let submit_template = match &settings.submit_template {
            Some(path) => Some(absolute(path)?),
            None => None,
        };
        Ok(Self {
            version: CURRENT_JOB_VERSION,
            dir: absolute(dir.as_ref())?,
            steps: Vec::new(),
            cur_state: 0,
            running: false,
            error_exit: false,
            tail_incomplete: false,
            input: Vec::new(),
            output: Vec::new(),
            checkpoint: Vec::new(),
            script_name: settings.script_name.clone(),
            log_name: settings.log_name.clone(),
            save_name: None,
            submit_command: settings.submit_command.clone(),
            submit_template,
            backup_command: settings.backup_command.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn cur_state(&self) -> usize {
        self.cur_state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn error_exit(&self) -> bool {
        self.error_exit
    }

    pub fn inputs(&self) -> &[String] {
        &self.input
    }

    pub fn outputs(&self) -> &[String] {
        &self.output
    }

    pub fn checkpoints(&self) -> &[String] {
        &self.checkpoint
    }

    pub fn script_path(&self) -> PathBuf {
        self.dir.join(&self.script_name)
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(&self.log_name)
    }

    /// Path of the job record, once the job has been saved.
    pub fn save_path(&self) -> Option<PathBuf> {
        self.save_name.as_ref().map(|name| self.dir.join(name))
    }

    pub fn save_name(&self) -> Option<&str> {
        self.save_name.as_deref()
    }

    /// Set the record file name without writing it.
    pub fn set_save_name(&mut self, name: impl Into<String>) {
        self.save_name = Some(name.into());
    }

    pub fn submit_command(&self) -> &str {
        &self.submit_command
    }

    pub fn submit_template(&self) -> Option<&Path> {
        self.submit_template.as_deref()
    }

    pub fn backup_command(&self) -> &str {
        &self.backup_command
    }

    pub fn set_submit_command(&mut self, command: impl Into<String>) {
        self.submit_command = command.into();
    }

    /// Use the file at `path` as header of every composed script.
    pub fn set_submit_template(&mut self, path: impl AsRef<Path>) -> Result<(), JobError> {
        self.submit_template = Some(absolute(path.as_ref())?);
        Ok(())
    }

    pub fn add_input(&mut self, file: impl Into<String>) -> &mut Self {
        push_unique(&mut self.input, file.into());
        self
    }

    pub fn add_output(&mut self, file: impl Into<String>) -> &mut Self {
        push_unique(&mut self.output, file.into());
        self
    }

    pub fn add_checkpoint(&mut self, file: impl Into<String>) -> &mut Self {
        push_unique(&mut self.checkpoint, file.into());
        self
    }

    /// Inputs, outputs and checkpoints, in that order.
    pub fn file_list(&self) -> Vec<String> {
        self.input.iter().chain(&self.output).chain(&self.checkpoint).cloned().collect()
    }

    /// First input or checkpoint file that does not exist, if any.
    pub fn missing_input(&self) -> Option<PathBuf> {
        self.input
            .iter()
            .chain(&self.checkpoint)
            .map(|file| self.dir.join(file))
            .find(|path| fs::symlink_metadata(path).is_err())
    }

    pub fn step_index(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.name == name)
    }

    fn ensure_unique(&self, name: &str) -> Result<(), JobError> {
        if self.step_index(name).is_some() {
            return Err(JobError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Append a program step, optionally followed by a backup step that
    /// archives the current file list into `<dir>/<name>/`.
    pub fn add_program(
        &mut self,
        name: &str,
        command: &str,
        backup: bool,
    ) -> Result<&mut Self, JobError> {
        self.ensure_unique(name)?;
        if backup {
            self.ensure_unique(&crate::step::backup_name(name))?;
        }
        self.steps.push(Step::program(name, command));
        if backup {
            self.steps.push(Step::backup(name, self.file_list()));
        }
        Ok(self)
    }

    /// Replace the command of program step `name` and add or drop its backup
    /// step so it matches `backup`. Step order is preserved.
    pub fn change_program(
        &mut self,
        name: &str,
        command: &str,
        backup: bool,
    ) -> Result<&mut Self, JobError> {
        let idx = self
            .steps
            .iter()
            .position(|step| step.name == name && !step.is_backup())
            .ok_or_else(|| JobError::NotFound(name.to_string()))?;
        self.steps[idx] = Step::program(name, command);

        // steps below cur_state have run; keep the completed prefix aligned
        let slot = idx + 1;
        let has_backup = self.steps.get(slot).is_some_and(|step| step.is_backup_of(name));
        if backup && !has_backup {
            self.ensure_unique(&crate::step::backup_name(name))?;
            self.steps.insert(slot, Step::backup(name, self.file_list()));
            if slot < self.cur_state {
                self.cur_state += 1;
            }
        } else if !backup && has_backup {
            self.steps.remove(slot);
            if slot < self.cur_state {
                self.cur_state -= 1;
            }
        }
        self.cur_state = self.cur_state.min(self.steps.len());
        Ok(self)
    }

    /// Move the job to `dest` without touching any files.
    ///
    /// Program commands that mention the old directory are rewritten to the
    /// new one, as is a submit template stored under it.
    pub fn chdir(&mut self, dest: impl AsRef<Path>) -> Result<(), JobError> {
        let old = std::mem::replace(&mut self.dir, absolute(dest.as_ref())?);
        let old_str = old.display().to_string();
        let new_str = self.dir.display().to_string();

        for step in &mut self.steps {
            if let crate::StepAction::Program { command } = &mut step.action {
                if command.contains(&old_str) {
                    *command = command.replace(&old_str, &new_str);
                }
            }
        }
        if let Some(template) = &self.submit_template {
            if let Ok(rel) = template.strip_prefix(&old) {
                self.submit_template = Some(self.dir.join(rel));
            }
        }
        Ok(())
    }

    /// Deep copy of this job relocated to `dest`.
    ///
    /// With `copy_files`, every listed file that exists is copied into
    /// `dest` without following symlinks.
    pub fn clone_to(&self, dest: impl AsRef<Path>, copy_files: bool) -> Result<Job, JobError> {
        let mut job = self.clone();
        job.chdir(dest)?;
        if copy_files && job.dir != self.dir {
            fs::create_dir_all(&job.dir).map_err(|e| JobError::io(&job.dir, e))?;
            for file in self.file_list() {
                let src = self.dir.join(&file);
                if fs::symlink_metadata(&src).is_err() {
                    continue;
                }
                let dest = job.dir.join(&file);
                copy_entry(&src, &dest).map_err(|e| JobError::io(&src, e))?;
            }
        }
        tracing::debug!(from = %self.dir.display(), to = %job.dir.display(), copy_files, "cloned job");
        Ok(job)
    }

    /// Write the job record as `save_name` (default `job.json`) in the job
    /// directory, creating the directory if needed.
    pub fn save(&mut self) -> Result<PathBuf, JobError> {
        let name = self.save_name.clone().unwrap_or_else(|| DEFAULT_SAVE_NAME.to_string());
        self.save_as(name)
    }

    /// Write the job record under a new file name.
    pub fn save_as(&mut self, name: impl Into<String>) -> Result<PathBuf, JobError> {
        self.save_name = Some(name.into());
        let path = self.dir.join(self.save_name.as_deref().unwrap_or(DEFAULT_SAVE_NAME));
        let tmp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| JobError::io(&self.dir, e))?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| JobError::Json { path: path.clone(), source: e })?;
        fs::write(&tmp_path, json.as_bytes()).map_err(|e| JobError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| JobError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "saved job");
        Ok(path)
    }

    /// Read a job record without looking at its log.
    pub fn load_record(path: impl AsRef<Path>) -> Result<Job, JobError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| JobError::io(path, e))?;
        let job: Job = serde_json::from_str(&content)
            .map_err(|e| JobError::Json { path: path.to_path_buf(), source: e })?;
        if job.version > CURRENT_JOB_VERSION {
            return Err(JobError::UnsupportedVersion {
                found: job.version,
                supported: CURRENT_JOB_VERSION,
            });
        }
        Ok(job)
    }

    /// Read a job record and refresh its status from the log.
    pub fn load(path: impl AsRef<Path>) -> Result<Job, JobError> {
        let mut job = Self::load_record(path)?;
        job.read_status()?;
        Ok(job)
    }

    /// Write the resumable submission script and return its path.
    ///
    /// The job must have been saved before; the record is saved again so it
    /// matches the script. Only steps from `cur_state` on are included.
    pub fn compose(&mut self) -> Result<PathBuf, JobError> {
        if self.save_name.is_none() {
            return Err(JobError::NotSaved(self.dir.clone()));
        }
        self.save()?;

        let header = match &self.submit_template {
            Some(template) => {
                Some(fs::read_to_string(template).map_err(|e| JobError::io(template, e))?)
            }
            None => None,
        };
        let body = script::render(self, header.as_deref());
        let path = self.script_path();
        fs::write(&path, body).map_err(|e| JobError::io(&path, e))?;
        make_executable(&path)?;
        tracing::debug!(
            script = %path.display(),
            from_step = self.cur_state,
            steps = self.steps.len(),
            "composed job script"
        );
        Ok(path)
    }

    /// Compose the script and hand it to the submit command.
    ///
    /// The command runs from the job directory with the script path as its
    /// last argument. The caller owns the returned client and should reap it.
    pub fn submit(&mut self) -> Result<Child, JobError> {
        let script = self.compose()?;
        let mut words = self.submit_command.split_whitespace();
        let program = words.next().ok_or(JobError::EmptySubmitCommand)?;
        let child = Command::new(program)
            .args(words)
            .arg(&script)
            .current_dir(&self.dir)
            .spawn()
            .map_err(|e| JobError::Spawn { command: self.submit_command.clone(), source: e })?;
        tracing::info!(dir = %self.dir.display(), pid = child.id(), "submitted job");
        Ok(child)
    }

    /// Re-derive progress from the job log.
    pub fn read_status(&mut self) -> Result<&mut Self, JobError> {
        self.error_exit = false;
        self.tail_incomplete = false;

        let log_path = self.log_path();
        let Some(summary) = read_log(&log_path).map_err(|e| JobError::io(&log_path, e))? else {
            self.cur_state = 0;
            self.running = false;
            return Ok(self);
        };

        let completed = summary.completed_steps();
        if completed > self.steps.len() {
            tracing::warn!(
                dir = %self.dir.display(),
                completed,
                steps = self.steps.len(),
                "log reports more steps than the job has"
            );
        }
        self.cur_state = completed.min(self.steps.len());
        self.running = self.cur_state != self.steps.len();
        self.tail_incomplete = summary.tail_incomplete;
        if summary.error {
            self.error_exit = true;
            self.running = false;
        }
        Ok(self)
    }

    /// Status implied by the last [`Job::read_status`].
    pub fn report(&self) -> JobStatus {
        if self.error_exit {
            JobStatus::Error
        } else if self.tail_incomplete {
            JobStatus::Running
        } else if self.cur_state == self.steps.len() {
            JobStatus::Completed
        } else if self.cur_state == 0 && !self.running {
            JobStatus::Pending
        } else {
            JobStatus::Running
        }
    }

    /// Read the log and report the resulting status.
    pub fn status(&mut self) -> Result<JobStatus, JobError> {
        Ok(self.read_status()?.report())
    }

    /// Whether every step has completed, according to the log.
    pub fn is_done(&mut self) -> Result<bool, JobError> {
        Ok(self.read_status()?.cur_state == self.steps.len())
    }

    /// The step after the last completed one: running, or failed on ERROR.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.cur_state)
    }

    /// Delete the log and every step-named directory in the job directory.
    pub fn clean(&self) -> Result<(), JobError> {
        let log = self.log_path();
        if log.exists() {
            fs::remove_file(&log).map_err(|e| JobError::io(&log, e))?;
        }
        for step in &self.steps {
            let path = self.dir.join(&step.name);
            if path.is_dir() {
                fs::remove_dir_all(&path).map_err(|e| JobError::io(&path, e))?;
            }
        }
        tracing::debug!(dir = %self.dir.display(), "cleaned job");
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), JobError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| JobError::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), JobError> {
    Ok(())
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
