// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jf-core: jobs, steps and job logs for the jf parameter sweep tool

pub mod macros;

pub mod backup;
pub mod env;
pub mod error;
pub mod job;
pub mod log;
pub mod param;
pub mod script;
pub mod settings;
pub mod status;
pub mod step;

#[cfg(any(test, feature = "test-support"))]
#[allow(clippy::panic)]
pub mod test_support;

pub use error::JobError;
pub use job::{Job, CURRENT_JOB_VERSION};
pub use log::LogSummary;
pub use param::{ParamValue, Params, Setter};
pub use settings::JobSettings;
pub use status::JobStatus;
pub use step::{Step, StepAction};
