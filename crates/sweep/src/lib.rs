// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jf-sweep: parameter sweeps and job collections
//!
//! A builder expands declared parameters into a [`ParameterSet`], crosses it
//! with named template jobs in a [`ParameterArray`], and `make()` produces a
//! [`JobArray`] that can be saved, submitted, reloaded and reported on.

mod array;
mod builder;
mod error;
mod job_array;
mod params;
pub mod template;

pub use array::ParameterArray;
pub use builder::{GridBuilder, RandomBuilder, SweepConfig};
pub use error::SweepError;
pub use job_array::{JobArray, StatusCounts, DEFAULT_MANIFEST_NAME};
pub use params::{mesh, random, GridParam, ParamPoint, ParameterSet, RandomParam};
pub use template::{PathTemplate, Slot};
