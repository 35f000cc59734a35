// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materializes a parameter set into job directories.

use crate::template::PathTemplate;
use crate::{JobArray, ParameterSet, SweepError};
use indexmap::IndexMap;
use jf_core::{Job, Setter};
use std::fs;
use std::path::{Path, PathBuf};

/// Parameter points crossed with named template jobs and repeat indices.
pub struct ParameterArray {
    base_dir: PathBuf,
    params: ParameterSet,
    template: PathTemplate,
    repeat: u32,
    instances: IndexMap<String, Job>,
    setter: Box<dyn Setter>,
    jobs: Vec<Job>,
}

impl ParameterArray {
    /// Fails with [`SweepError::InvalidTemplate`] unless `template` has the
    /// instance and key slots, and the repeat slot exactly when `repeat > 0`.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        params: ParameterSet,
        template: PathTemplate,
        setter: Box<dyn Setter>,
        repeat: u32,
    ) -> Result<Self, SweepError> {
        template.require_slots(repeat > 0)?;
        Ok(Self {
            base_dir: base_dir.into(),
            params,
            template,
            repeat,
            instances: IndexMap::new(),
            setter,
            jobs: Vec::new(),
        })
    }

    /// Replace the template jobs, keyed by instance name.
    pub fn set_instances(
        &mut self,
        instances: impl IntoIterator<Item = (String, Job)>,
    ) -> Result<(), SweepError> {
        let mut map = IndexMap::new();
        for (name, job) in instances {
            if map.contains_key(&name) {
                return Err(SweepError::DuplicateName(name));
            }
            map.insert(name, job);
        }
        self.instances = map;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn instance_names(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Jobs generated by the last [`ParameterArray::make`].
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// `[None]` without repeats, else `1..=repeat`.
    pub fn repeat_indices(&self) -> Vec<Option<u32>> {
        if self.repeat == 0 {
            vec![None]
        } else {
            (1..=self.repeat).map(Some).collect()
        }
    }

    /// Directory of the job for one (instance, key, repeat) combination.
    pub fn get_path(
        &self,
        instance: &str,
        key: &str,
        repeat: Option<u32>,
    ) -> Result<PathBuf, SweepError> {
        Ok(self.base_dir.join(self.template.render(instance, key, repeat)?))
    }

    /// Every (instance, point, repeat) combination with its directory, in
    /// generation order.
    fn combinations(&self) -> Result<Vec<Combination<'_>>, SweepError> {
        let repeats = self.repeat_indices();
        let mut out = Vec::with_capacity(self.instances.len() * self.params.len() * repeats.len());
        for (name, job) in &self.instances {
            for point in &self.params {
                for &repeat in &repeats {
                    let path = self.get_path(name, &point.key, repeat)?;
                    out.push(Combination { name, job, point, path });
                }
            }
        }
        Ok(out)
    }

    /// Clone each instance into every combination's directory (copying its
    /// files) and apply the setter to the clone.
    ///
    /// Replaces the jobs from any earlier call.
    pub fn make(&mut self) -> Result<JobArray, SweepError> {
        let mut jobs = Vec::new();
        for combo in self.combinations()? {
            let mut job = combo.job.clone_to(&combo.path, true)?;
            self.setter.set(&mut job, &combo.point.params)?;
            jobs.push(job);
        }
        tracing::info!(
            base_dir = %self.base_dir.display(),
            jobs = jobs.len(),
            instances = self.instances.len(),
            points = self.params.len(),
            "generated sweep"
        );
        self.jobs = jobs;
        Ok(JobArray::from_jobs(&self.base_dir, self.jobs.clone()))
    }

    /// Write one CSV row per combination: `id,name,<params...>,path`.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<(), SweepError> {
        let path = path.as_ref();
        let mut out = String::new();

        let mut header = vec!["id".to_string(), "name".to_string()];
        header.extend(self.params.names().into_iter().map(str::to_string));
        header.push("path".to_string());
        push_row(&mut out, &header);

        for (id, combo) in self.combinations()?.into_iter().enumerate() {
            let mut row = vec![id.to_string(), combo.name.to_string()];
            row.extend(combo.point.params.values().map(ToString::to_string));
            row.push(combo.path.display().to_string());
            push_row(&mut out, &row);
        }

        fs::write(path, out).map_err(|e| SweepError::io(path, e))
    }
}

struct Combination<'a> {
    name: &'a str,
    job: &'a Job,
    point: &'a crate::ParamPoint,
    path: PathBuf,
}

/// Append one CSV record, quoting fields only when needed.
fn push_row(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_field(field));
    }
    out.push_str("\r\n");
}

fn csv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}

#[cfg(test)]
#[path = "array_tests.rs"]
mod tests;
