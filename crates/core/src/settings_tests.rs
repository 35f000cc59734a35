// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear_env() {
    for key in [env::SUBMIT_CMD, env::BACKUP_CMD, env::SCRIPT_NAME, env::LOG_NAME] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn from_env_without_overrides_matches_defaults() {
    clear_env();
    assert_eq!(JobSettings::from_env(), JobSettings::default());
}

#[test]
#[serial]
fn from_env_reads_overrides() {
    clear_env();
    std::env::set_var(env::SUBMIT_CMD, "sbatch --parsable");
    std::env::set_var(env::BACKUP_CMD, "/opt/jf/bin/jf backup");
    std::env::set_var(env::LOG_NAME, "run.log");

    let settings = JobSettings::from_env();
    clear_env();

    assert_eq!(settings.submit_command, "sbatch --parsable");
    assert_eq!(settings.backup_command, "/opt/jf/bin/jf backup");
    assert_eq!(settings.log_name, "run.log");
    assert_eq!(settings.script_name, DEFAULT_SCRIPT_NAME);
}

#[test]
#[serial]
fn blank_override_is_ignored() {
    clear_env();
    std::env::set_var(env::SUBMIT_CMD, "   ");

    let settings = JobSettings::from_env();
    clear_env();

    assert_eq!(settings.submit_command, DEFAULT_SUBMIT_COMMAND);
}

#[test]
fn setters_chain() {
    let settings = JobSettings::default()
        .submit_command("bsub")
        .log_name("steps.log")
        .submit_template("/etc/pbs/header.sh");

    assert_eq!(settings.submit_command, "bsub");
    assert_eq!(settings.log_name, "steps.log");
    assert_eq!(settings.submit_template, Some(PathBuf::from("/etc/pbs/header.sh")));
}
