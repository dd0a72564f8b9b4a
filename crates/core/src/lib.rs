// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cue-core: condition-gated sequencing engine
//!
//! This crate provides:
//! - `AsyncToken` and its `all_of` / `wait_all` combinators
//! - Conditions with an enable/disable lifecycle, and the Action capability
//! - The Node state machine and the Sequence container
//!
//! Everything runs on one logical thread; handles are `Rc`-based and
//! deliberately `!Send`.

pub mod action;
pub mod combinator;
pub mod condition;
pub mod context;
pub mod error;
pub mod node;
pub mod sequence;
pub mod signal;
pub mod snapshot;
pub mod token;

#[cfg(test)]
mod test_support;

pub use action::{Action, FnAction};
pub use combinator::{all_of, wait_all};
pub use condition::{Condition, Gate, MetHandle};
pub use context::{NodeContext, SequenceContext, SequenceEvent};
pub use error::TokenError;
pub use node::{Node, NodeBuilder, NodeFlags, NodeId};
pub use sequence::{Sequence, SequenceOptions};
pub use signal::{ListenerId, Listeners};
pub use snapshot::{NodeSnapshot, SequenceSnapshot};
pub use token::{AsyncToken, TokenState};
