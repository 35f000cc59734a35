// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn jf_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("status")
        .stdout_has("submit")
        .stdout_has("backup");
}

#[test]
fn jf_without_command_fails_with_usage() {
    cli().exits(2).stderr_has("Usage:");
}

#[test]
fn jf_status_help_shows_flags() {
    cli()
        .args(&["status", "--help"])
        .passes()
        .stdout_has("--manifest")
        .stdout_has("--errors")
        .stdout_has("--format");
}

#[test]
fn jf_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
