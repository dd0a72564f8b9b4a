// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actions: externally visible units of work

use crate::context::NodeContext;
use crate::token::AsyncToken;

/// Capability implemented by concrete actions.
///
/// `act` is a synchronous call with an asynchronous result: it starts the
/// work and returns a token that the implementation resolves later, on the
/// same logical thread as the engine.
pub trait Action {
    /// Type tag, used for logging
    fn kind(&self) -> &str;

    /// Called once with the owning node's context before first use
    fn initialize(&mut self, _ctx: &NodeContext) {}

    /// Start one invocation
    fn act(&self) -> AsyncToken;
}

/// Action backed by a closure
pub struct FnAction<F> {
    kind: String,
    f: F,
}

impl<F> FnAction<F>
where
    F: Fn() -> AsyncToken,
{
    pub fn new(kind: impl Into<String>, f: F) -> Self {
        Self {
            kind: kind.into(),
            f,
        }
    }
}

impl<F> Action for FnAction<F>
where
    F: Fn() -> AsyncToken,
{
    fn kind(&self) -> &str {
        &self.kind
    }

    fn act(&self) -> AsyncToken {
        (self.f)()
    }
}
