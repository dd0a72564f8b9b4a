// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! cue - run scripted sequences from a TOML runbook

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod input;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, list, run};

#[derive(Parser)]
#[command(name = "cue", version, about = "Cue - scripted sequence runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, validate and build a runbook
    Check(check::CheckArgs),
    /// List the sequences in a runbook
    List(list::ListArgs),
    /// Run sequences, reading host commands from stdin
    Run(run::RunArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    match cli.command {
        Commands::Check(args) => check::check(args),
        Commands::List(args) => list::list(args),
        Commands::Run(args) => run::run(args).await,
    }
}

/// Log to stderr, filtered by `CUE_LOG` (default `warn`)
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("CUE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
