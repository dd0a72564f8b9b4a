// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cue run <path>` - Run sequences against commands from stdin

use crate::input::{parse_flag, parse_line, Command};
use crate::output::{print_message, print_status, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use cue_adapters::{Factory, HostMessage, HostServices, Outbox};
use cue_engine::{Director, Request, RuntimeConfig};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

#[derive(Args)]
pub struct RunArgs {
    /// Runbook file or directory of `.toml` files
    pub path: PathBuf,

    /// Sequence to activate (repeatable; default: all)
    #[arg(long = "sequence", short = 's')]
    pub sequences: Vec<String>,

    /// Initial flag value (can be repeated)
    #[arg(long = "flag", value_parser = parse_flag)]
    pub flags: Vec<(String, bool)>,

    /// Timer poll interval in milliseconds
    #[arg(long, default_value_t = 50)]
    pub tick_ms: u64,

    /// Print host messages and status as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let runbook = super::load(&args.path)?;
    let format = OutputFormat::from_json_flag(args.json);

    let (outbox, messages) = Outbox::new();
    let host = HostServices::system(outbox);
    for (flag, value) in &args.flags {
        host.flags.set(flag, *value);
    }

    let mut director = Director::new(host, Factory::default());
    director.load(&runbook)?;

    let (stop_printer, stopped) = oneshot::channel();
    let printer = tokio::spawn(print_messages(messages, stopped, format));

    let names: Vec<String> = if args.sequences.is_empty() {
        runbook.names().map(str::to_string).collect()
    } else {
        args.sequences.clone()
    };
    for name in &names {
        director
            .activate(name)
            .with_context(|| format!("cannot activate {}", name))?;
    }

    // A plain thread so a blocked stdin read never holds up shutdown
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_commands(tx, format));

    let config = RuntimeConfig {
        tick_interval: Duration::from_millis(args.tick_ms.max(1)),
    };
    director.run(rx, &config).await;

    // Everything the director emitted is already queued
    if stop_printer.send(()).is_err() {
        tracing::debug!("message printer already stopped");
    }
    printer.await.context("message printer failed")?;
    Ok(())
}

/// Print host messages until told to stop, then drain what is queued
async fn print_messages(
    mut messages: mpsc::UnboundedReceiver<HostMessage>,
    mut stop: oneshot::Receiver<()>,
    format: OutputFormat,
) {
    loop {
        tokio::select! {
            biased;
            message = messages.recv() => match message {
                Some(message) => print_message(&message, format),
                None => return,
            },
            _ = &mut stop => break,
        }
    }
    while let Ok(message) = messages.try_recv() {
        print_message(&message, format);
    }
}

/// Forward stdin commands to the director until EOF or `quit`
fn read_commands(tx: mpsc::UnboundedSender<Request>, format: OutputFormat) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        };
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };
        match command {
            Command::Event(event) => {
                if tx.send(Request::Event(event)).is_err() {
                    break;
                }
            }
            Command::Status => {
                let (reply, status) = oneshot::channel();
                if tx.send(Request::Status(reply)).is_err() {
                    break;
                }
                match status.blocking_recv() {
                    Ok(statuses) => print_status(&statuses, format),
                    Err(_) => break,
                }
            }
            Command::Quit => break,
        }
    }
    tracing::debug!("command input closed");
}
