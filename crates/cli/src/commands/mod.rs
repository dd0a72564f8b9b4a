// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod list;
pub mod run;

use anyhow::{Context, Result};
use cue_runbook::Runbook;
use std::path::Path;

/// Load a runbook file or directory, naming the path in any error
fn load(path: &Path) -> Result<Runbook> {
    cue_runbook::load_runbook(path)
        .with_context(|| format!("failed to load runbook {}", path.display()))
}
