// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders that assemble a [`ParameterArray`] from parameter declarations,
//! named instances and a setter.

use crate::params::{mesh, random, GridParam, RandomParam};
use crate::template::PathTemplate;
use crate::{ParameterArray, ParameterSet, SweepError};
use indexmap::IndexMap;
use jf_core::{Job, ParamValue, Setter};
use rand::Rng;
use std::path::PathBuf;

/// State shared by both builders.
pub struct SweepConfig {
    base_dir: PathBuf,
    separator: String,
    repeat: u32,
    new_folder: bool,
    instances: IndexMap<String, Job>,
    setter: Option<Box<dyn Setter>>,
}

impl SweepConfig {
    pub fn new(base_dir: impl Into<PathBuf>, separator: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            separator: separator.into(),
            repeat: 0,
            new_folder: false,
            instances: IndexMap::new(),
            setter: None,
        }
    }

    pub fn add_instance(&mut self, name: impl Into<String>, job: Job) -> Result<(), SweepError> {
        let name = name.into();
        if self.instances.contains_key(&name) {
            return Err(SweepError::DuplicateName(name));
        }
        self.instances.insert(name, job);
        Ok(())
    }

    pub fn set_setter(&mut self, setter: impl Setter + 'static) {
        if self.setter.is_some() {
            tracing::warn!(base_dir = %self.base_dir.display(), "replacing sweep setter");
        }
        self.setter = Some(Box::new(setter));
    }

    /// Run every combination `repeat` times. With `new_folder` each repeat
    /// gets its own subdirectory instead of a path suffix.
    pub fn set_repeat(&mut self, repeat: u32, new_folder: bool) -> Result<(), SweepError> {
        if repeat == 0 {
            return Err(SweepError::InvalidRepeat(repeat));
        }
        self.repeat = repeat;
        self.new_folder = new_folder;
        Ok(())
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Template implied by the instances and repeat settings.
    ///
    /// A single instance named `""` is left out of the path entirely.
    pub fn path_template(&self) -> String {
        let single_unnamed =
            self.instances.len() == 1 && self.instances.keys().all(|name| name.is_empty());
        let mut template = if single_unnamed {
            "{instance}{key}".to_string()
        } else {
            format!("{{instance}}{}{{key}}", self.separator)
        };
        if self.repeat > 0 {
            if self.new_folder {
                template.push_str("/{repeat}");
            } else {
                template.push_str(&self.separator);
                template.push_str("{repeat}");
            }
        }
        template
    }

    fn check(&self, has_params: bool) -> Result<(), SweepError> {
        if !has_params {
            return Err(SweepError::NoParameters);
        }
        if self.setter.is_none() {
            return Err(SweepError::NoSetter);
        }
        Ok(())
    }

    fn finish(self, params: ParameterSet) -> Result<ParameterArray, SweepError> {
        let template = PathTemplate::parse(&self.path_template())?;
        let setter = self.setter.ok_or(SweepError::NoSetter)?;
        let mut array = ParameterArray::new(self.base_dir, params, template, setter, self.repeat)?;
        array.set_instances(self.instances)?;
        Ok(array)
    }
}

/// Builder methods that forward to the shared [`SweepConfig`].
macro_rules! config_methods {
    () => {
        pub fn add_instance(
            &mut self,
            name: impl Into<String>,
            job: Job,
        ) -> Result<&mut Self, SweepError> {
            self.config.add_instance(name, job)?;
            Ok(self)
        }

        pub fn set_setter(&mut self, setter: impl Setter + 'static) -> &mut Self {
            self.config.set_setter(setter);
            self
        }

        pub fn set_repeat(&mut self, repeat: u32, new_folder: bool) -> Result<&mut Self, SweepError> {
            self.config.set_repeat(repeat, new_folder)?;
            Ok(self)
        }

        pub fn config(&self) -> &SweepConfig {
            &self.config
        }

        /// Fails if no parameter or no setter has been added.
        pub fn check(&self) -> Result<(), SweepError> {
            self.config.check(!self.params.is_empty())
        }
    };
}

/// Sweep over the cartesian product of discrete values.
pub struct GridBuilder {
    config: SweepConfig,
    params: Vec<GridParam>,
}

impl GridBuilder {
    pub fn new(base_dir: impl Into<PathBuf>, separator: impl Into<String>) -> Self {
        Self { config: SweepConfig::new(base_dir, separator), params: Vec::new() }
    }

    pub fn add_parameter<V: Into<ParamValue>>(
        &mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.params.push(GridParam::new(name, key, values));
        self
    }

    config_methods!();

    pub fn build(self) -> Result<ParameterArray, SweepError> {
        self.check()?;
        let params = mesh(&self.params, &self.config.separator)?;
        self.config.finish(params)
    }
}

/// Sweep over uniformly sampled points.
pub struct RandomBuilder {
    config: SweepConfig,
    params: Vec<RandomParam>,
}

impl RandomBuilder {
    pub fn new(base_dir: impl Into<PathBuf>, separator: impl Into<String>) -> Self {
        Self { config: SweepConfig::new(base_dir, separator), params: Vec::new() }
    }

    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        min: f64,
        max: f64,
    ) -> &mut Self {
        self.params.push(RandomParam::new(name, key, min, max));
        self
    }

    config_methods!();

    pub fn build<R: Rng>(self, npoints: usize, rng: &mut R) -> Result<ParameterArray, SweepError> {
        self.check()?;
        let params = random(&self.params, npoints, rng)?;
        self.config.finish(params)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
