// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced action wrapper for consistent observability

use cue_core::{Action, AsyncToken, NodeContext, TokenState};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Wrapper that adds tracing to any action
pub struct TracedAction {
    inner: Box<dyn Action>,
    sequence: String,
    node: Option<u32>,
}

impl TracedAction {
    pub fn new(inner: Box<dyn Action>) -> Self {
        Self {
            inner,
            sequence: String::new(),
            node: None,
        }
    }
}

impl Action for TracedAction {
    fn kind(&self) -> &str {
        self.inner.kind()
    }

    fn initialize(&mut self, ctx: &NodeContext) {
        self.sequence = ctx.sequence_name().to_string();
        self.node = ctx.node_id().map(|id| id.0);
        self.inner.initialize(ctx);
    }

    fn act(&self) -> AsyncToken {
        let span = tracing::info_span!(
            "action.act",
            action = self.inner.kind(),
            sequence = %self.sequence,
            node = self.node,
        );
        let _guard = span.enter();

        tracing::info!("invoking");
        let start = Instant::now();
        let token = self.inner.act();

        let resolved = Rc::new(Cell::new(false));
        let resolved_span = span.clone();
        let mark = Rc::clone(&resolved);
        token.ready(move |token| {
            mark.set(true);
            let _guard = resolved_span.enter();
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match token.state() {
                TokenState::Failed(e) => tracing::warn!(elapsed_ms, error = %e, "failed"),
                _ => tracing::info!(elapsed_ms, "succeeded"),
            }
        });
        let aborted_span = span.clone();
        token.on_abort(move || {
            if resolved.get() {
                return;
            }
            let _guard = aborted_span.enter();
            tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "aborted");
        });

        token
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
