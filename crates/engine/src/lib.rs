// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Sequence engine: builds runbook sequences and drives them from host events

mod build;
mod director;
mod error;
mod id;
mod runtime;

pub use build::build_sequence;
pub use director::{Director, HostEvent, RunStatus, SequenceStatus};
pub use error::EngineError;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use runtime::{Request, RuntimeConfig};
