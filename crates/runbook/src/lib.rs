// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Declarative sequence definitions
//!
//! Parses TOML runbooks into plain definition graphs. Action and condition
//! entries keep their `type` tag and raw parameters; turning them into live
//! objects is the engine's job.

mod loader;
mod parser;
mod sequence;
mod validator;

pub use loader::{load_runbook, load_runbook_dir, load_runbook_file, LoadError};
pub use parser::{parse_runbook, ParseError, Runbook};
pub use sequence::{ItemDef, NodeDef, SequenceDef};
pub use validator::{validate_runbook, ValidationError, ValidationErrors};
