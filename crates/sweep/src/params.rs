// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter space expansion.
//!
//! [`mesh`] crosses discrete value lists; [`random`] samples uniformly inside
//! per-parameter bounds. Both yield a [`ParameterSet`]: an ordered list of
//! points, each with a key that names its job directory.

use crate::SweepError;
use itertools::Itertools;
use jf_core::{ParamValue, Params};
use rand::Rng;
use std::collections::HashSet;

/// A parameter swept over a fixed list of values.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParam {
    pub name: String,
    /// Short label used in point keys
    pub key: String,
    pub values: Vec<ParamValue>,
}

impl GridParam {
    pub fn new<V: Into<ParamValue>>(
        name: impl Into<String>,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A parameter drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomParam {
    pub name: String,
    pub key: String,
    pub min: f64,
    pub max: f64,
}

impl RandomParam {
    pub fn new(name: impl Into<String>, key: impl Into<String>, min: f64, max: f64) -> Self {
        Self { name: name.into(), key: key.into(), min, max }
    }

    fn check(&self) -> Result<(), SweepError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(SweepError::InvalidBounds {
                name: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// One point of a parameter space.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamPoint {
    pub key: String,
    pub params: Params,
}

/// Ordered points with distinct keys and a shared set of parameter names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    points: Vec<ParamPoint>,
}

impl ParameterSet {
    pub fn new(points: Vec<ParamPoint>) -> Result<Self, SweepError> {
        let mut keys = HashSet::with_capacity(points.len());
        for point in &points {
            if !keys.insert(point.key.as_str()) {
                return Err(SweepError::DuplicateKey(point.key.clone()));
            }
        }
        if let Some(first) = points.first() {
            let mismatched = points.iter().find(|point| !point.params.keys().eq(first.params.keys()));
            if let Some(point) = mismatched {
                return Err(SweepError::MismatchedParameters(point.key.clone()));
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ParamPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParamPoint> {
        self.points.iter()
    }

    /// Parameter names in declaration order (empty for an empty set).
    pub fn names(&self) -> Vec<&str> {
        self.points
            .first()
            .map(|point| point.params.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a ParamPoint;
    type IntoIter = std::slice::Iter<'a, ParamPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Full cartesian product of `specs`, first parameter varying slowest.
///
/// Each point's key joins `<key><index>` of every parameter with `sep`, where
/// index is the position of the chosen value in that parameter's list.
pub fn mesh(specs: &[GridParam], sep: &str) -> Result<ParameterSet, SweepError> {
    if specs.is_empty() {
        return Err(SweepError::NoParameters);
    }
    if let Some(empty) = specs.iter().find(|spec| spec.values.is_empty()) {
        return Err(SweepError::EmptyValues(empty.name.clone()));
    }

    let points = specs
        .iter()
        .map(|spec| 0..spec.values.len())
        .multi_cartesian_product()
        .map(|indices| {
            let key = specs
                .iter()
                .zip(&indices)
                .map(|(spec, index)| format!("{}{}", spec.key, index))
                .join(sep);
            let params = specs
                .iter()
                .zip(&indices)
                .map(|(spec, &index)| (spec.name.clone(), spec.values[index].clone()))
                .collect();
            ParamPoint { key, params }
        })
        .collect();
    ParameterSet::new(points)
}

/// Uniform draw in `[min, max]`, including bounds whose width overflows `f64`.
fn sample<R: Rng>(spec: &RandomParam, rng: &mut R) -> f64 {
    if spec.max - spec.min < f64::MAX / 2.0 {
        return rng.random_range(spec.min..=spec.max);
    }
    // two half-width strides from min stay finite
    let half = spec.max / 2.0 - spec.min / 2.0;
    let u: f64 = rng.random();
    (spec.min + half * u + half * u).clamp(spec.min, spec.max)
}

/// `npoints` independent uniform draws inside each parameter's bounds.
///
/// Keys are the concatenated parameter keys followed by the point index,
/// so they are only unique within one call.
pub fn random<R: Rng>(
    specs: &[RandomParam],
    npoints: usize,
    rng: &mut R,
) -> Result<ParameterSet, SweepError> {
    if specs.is_empty() {
        return Err(SweepError::NoParameters);
    }
    for spec in specs {
        spec.check()?;
    }

    let prefix: String = specs.iter().map(|spec| spec.key.as_str()).collect();
    let points = (0..npoints)
        .map(|i| {
            let params = specs
                .iter()
                .map(|spec| {
                    (spec.name.clone(), ParamValue::Float(sample(spec, rng)))
                })
                .collect();
            ParamPoint { key: format!("{prefix}{i}"), params }
        })
        .collect();
    ParameterSet::new(points)
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
