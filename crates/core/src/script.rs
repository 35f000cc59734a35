// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resumable job script rendering.
//!
//! The script only contains the steps that have not completed yet, so a job
//! re-composed after a partial run picks up where its log left off.

use crate::step::{shell_quote, single_quote};
use crate::Job;
use std::fmt::Write as _;

/// Append `message` as one line to the log at `log`.
fn log_line(script: &mut String, message: &str, log: &str) {
    let _ = writeln!(script, "printf '%s\\n' {} >> {}", single_quote(message), log);
}

/// Command text as it appears in the log: one line, with line breaks escaped.
pub(crate) fn log_text(command: &str) -> String {
    command.replace('\\', "\\\\").replace('\n', "\\n").replace('\r', "\\r")
}

/// Render the submission script for `job`.
///
/// `header` is the content of the job's submit template, copied verbatim
/// ahead of the generated body (scheduler directives and the interpreter
/// line). Without one the script starts with `#!/bin/sh`.
pub fn render(job: &Job, header: Option<&str>) -> String {
    let dir = job.dir().display().to_string();
    let log = job.log_path().display().to_string();
    let log = shell_quote(&log);
    let mut script = String::new();

    match header {
        Some(header) => {
            script.push_str(header);
            if !header.is_empty() && !header.ends_with('\n') {
                script.push('\n');
            }
        }
        None => script.push_str("#!/bin/sh\n"),
    }

    let _ = writeln!(script, "cd {} || exit 1", shell_quote(&dir));
    log_line(&mut script, &format!("Starting job {} at step {}", dir, job.cur_state()), &log);

    for (index, step) in job.steps().iter().enumerate().skip(job.cur_state()) {
        let command = step.command(job.dir(), job.backup_command());
        let logged = log_text(&command);
        let _ = writeln!(script, "{command}");
        let _ = writeln!(
            script,
            "status=$?; if [ \"$status\" -ne 0 ]; then printf '%s\\n' {} >> {}; exit \"$status\"; fi",
            single_quote(&format!("ERROR on {logged}")),
            log
        );
        log_line(&mut script, &format!("{index}: {logged}"), &log);
    }

    script
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
