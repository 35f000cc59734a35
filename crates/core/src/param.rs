// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter values and the [`Setter`] capability that applies them to a job.

use crate::{Job, JobError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single swept value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Parameter name to value, in declaration order.
pub type Params = IndexMap<String, ParamValue>;

/// Applies one parameter point to a freshly cloned job.
///
/// Implemented for any `Fn(&mut Job, &Params) -> Result<(), JobError>`, so a
/// closure is usually all a sweep needs.
pub trait Setter {
    fn set(&self, job: &mut Job, params: &Params) -> Result<(), JobError>;
}

impl<F> Setter for F
where
    F: Fn(&mut Job, &Params) -> Result<(), JobError>,
{
    fn set(&self, job: &mut Job, params: &Params) -> Result<(), JobError> {
        self(job, params)
    }
}

#[cfg(test)]
#[path = "param_tests.rs"]
mod tests;
