// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `jf` subcommands.

mod backup;
mod help;
mod status;
mod submit;
