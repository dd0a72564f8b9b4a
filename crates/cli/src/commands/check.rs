// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cue check <path>` - Validate a runbook and build every sequence

use anyhow::{Context, Result};
use clap::Args;
use cue_adapters::{Factory, HostServices, Outbox};
use cue_engine::build_sequence;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Runbook file or directory of `.toml` files
    pub path: PathBuf,
}

pub fn check(args: CheckArgs) -> Result<()> {
    let runbook = super::load(&args.path)?;
    let factory = Factory::default();
    let host = HostServices::system(Outbox::detached());

    for def in runbook.sequences.values() {
        build_sequence(def, &factory, &host)
            .with_context(|| format!("sequence {} does not build", def.name))?;
        match &def.condition {
            Some(condition) => println!(
                "{}: {} node(s), gated by {}",
                def.name,
                def.nodes.len(),
                condition.kind
            ),
            None => println!("{}: {} node(s)", def.name, def.nodes.len()),
        }
    }
    println!("ok: {} sequence(s)", runbook.sequences.len());
    Ok(())
}
