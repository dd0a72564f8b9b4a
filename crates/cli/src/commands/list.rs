// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cue list <path>` - Show the sequences in a runbook

use crate::output::{print_list, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// Runbook file or directory of `.toml` files
    pub path: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SequenceSummary {
    name: String,
    nodes: usize,
    repeatable: bool,
    final_nodes: Vec<u32>,
    condition: Option<String>,
}

impl fmt::Display for SequenceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let finals = if self.final_nodes.is_empty() {
            "-".to_string()
        } else {
            self.final_nodes
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        write!(
            f,
            "{:<20} {:<6} {:<11} {:<8} {}",
            self.name,
            self.nodes,
            if self.repeatable { "yes" } else { "no" },
            finals,
            self.condition.as_deref().unwrap_or("-")
        )
    }
}

pub fn list(args: ListArgs) -> Result<()> {
    let runbook = super::load(&args.path)?;
    let summaries: Vec<SequenceSummary> = runbook
        .sequences
        .values()
        .map(|def| SequenceSummary {
            name: def.name.clone(),
            nodes: def.nodes.len(),
            repeatable: def.repeatable,
            final_nodes: def.final_nodes().map(|node| node.id).collect(),
            condition: def.condition.as_ref().map(|c| c.kind.clone()),
        })
        .collect();

    let format = OutputFormat::from_json_flag(args.json);
    if let OutputFormat::Text = format {
        if summaries.is_empty() {
            println!("No sequences");
            return Ok(());
        }
        println!(
            "{:<20} {:<6} {:<11} {:<8} CONDITION",
            "NAME", "NODES", "REPEATABLE", "FINAL"
        );
    }
    print_list(&summaries, format);
    Ok(())
}
