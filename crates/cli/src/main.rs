// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jf: status, submission and backup drivers for parameter sweeps

mod color;
mod commands;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exit_error::ExitError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jf", version, styles = color::styles())]
#[command(about = "Generate, submit and track parameter sweep jobs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the status of every job in a saved sweep
    Status(commands::status::StatusArgs),
    /// Submit every job of a saved sweep to its scheduler
    Submit(commands::submit::SubmitArgs),
    /// Copy job files into <DIR>/<NAME>/, keeping symlinks as links
    Backup(commands::backup::BackupArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(jf_core::env::LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status(args) => commands::status::handle(args),
        Commands::Submit(args) => commands::submit::handle(args),
        Commands::Backup(args) => commands::backup::handle(args),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        if let Some(exit) = err.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("error: {}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
