// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequence: ordered nodes behind an optional gating condition
//!
//! The sequence is the unit of recovery. Any fail-on-error node failure
//! resets every node, and losing the gating condition does the same
//! (unless `reset_on_condition_lost` is off). There is no terminal state:
//! the sequence re-arms whenever its gating condition becomes met again.

use crate::condition::{Condition, Gate};
use crate::context::{SequenceContext, SequenceEvent};
use crate::error::TokenError;
use crate::node::{Node, NodeBuilder, NodeId};
use crate::signal::ListenerId;
use crate::snapshot::SequenceSnapshot;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Sequence-wide behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceOptions {
    /// Reset every node when the gating condition stops being met
    pub reset_on_condition_lost: bool,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            reset_on_condition_lost: true,
        }
    }
}

pub(crate) struct SequenceShared {
    ctx: SequenceContext,
    options: SequenceOptions,
    condition: Option<Gate>,
    nodes: Vec<Node>,
    wired: Cell<bool>,
    resetting: Cell<bool>,
    /// Bumped on every reset so an in-flight enable pass can stop
    generation: Cell<u64>,
    enable_passes: Cell<u64>,
}

/// Handle to a sequence. Clones refer to the same graph.
#[derive(Clone)]
pub struct Sequence {
    shared: Rc<SequenceShared>,
}

impl Sequence {
    /// Build a sequence, initializing every condition and action
    pub fn new(
        name: impl Into<String>,
        options: SequenceOptions,
        condition: Option<Box<dyn Condition>>,
        nodes: Vec<NodeBuilder>,
    ) -> Self {
        let ctx = SequenceContext::new(name);
        let shared = Rc::new_cyclic(|weak: &Weak<SequenceShared>| {
            let condition = condition.map(|condition| {
                let mut gate = Gate::new(condition);
                gate.initialize(&ctx.top_level());
                gate
            });
            let nodes = nodes
                .into_iter()
                .map(|node| node.build(&ctx, weak.clone()))
                .collect();
            SequenceShared {
                ctx: ctx.clone(),
                options,
                condition,
                nodes,
                wired: Cell::new(false),
                resetting: Cell::new(false),
                generation: Cell::new(0),
                enable_passes: Cell::new(0),
            }
        });
        Sequence { shared }
    }

    pub(crate) fn from_shared(shared: Rc<SequenceShared>) -> Self {
        Sequence { shared }
    }

    pub fn name(&self) -> &str {
        self.shared.ctx.name()
    }

    pub fn options(&self) -> SequenceOptions {
        self.shared.options
    }

    pub fn context(&self) -> &SequenceContext {
        &self.shared.ctx
    }

    pub fn nodes(&self) -> &[Node] {
        &self.shared.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.shared.nodes.iter().find(|node| node.id() == id)
    }

    pub fn condition(&self) -> Option<&Gate> {
        self.shared.condition.as_ref()
    }

    /// Subscribe to lifecycle events
    pub fn on_event(&self, callback: impl Fn(&SequenceEvent) + 'static) -> ListenerId {
        self.shared.ctx.on_event(callback)
    }

    /// True with no gating condition, or while it is met
    pub fn is_eligible(&self) -> bool {
        self.shared
            .condition
            .as_ref()
            .map_or(true, Gate::is_met)
    }

    /// Arm the sequence.
    ///
    /// Wires the gating condition and sequential nodes (once), enables the
    /// gating condition, then enables nodes if eligible. Calling it again
    /// re-arms without wiring twice.
    pub fn initialize(&self) {
        if !self.shared.wired.replace(true) {
            if let Some(gate) = &self.shared.condition {
                let sequence = Rc::downgrade(&self.shared);
                gate.on_changed(move |met| {
                    if let Some(shared) = sequence.upgrade() {
                        Sequence { shared }.handle_condition_changed(*met);
                    }
                });
            }
            let mut previous: Option<&Node> = None;
            for node in &self.shared.nodes {
                node.wire(previous);
                previous = Some(node);
            }
        }

        // A gate that is met the moment it is enabled already ran `enable`
        let passes = self.shared.enable_passes.get();
        if let Some(gate) = &self.shared.condition {
            gate.set_enabled(true);
        }

        tracing::debug!(
            sequence = self.name(),
            nodes = self.shared.nodes.len(),
            eligible = self.is_eligible(),
            "sequence armed"
        );
        self.shared.ctx.emit(SequenceEvent::Armed);

        if self.is_eligible() && self.shared.enable_passes.get() == passes {
            self.enable();
        }
    }

    /// Try to enable every node; only nodes without a blocking
    /// predecessor proceed. Stops early if a failure resets the sequence.
    pub fn enable(&self) {
        tracing::info!(sequence = self.name(), "sequence enabled");
        self.shared
            .enable_passes
            .set(self.shared.enable_passes.get() + 1);
        self.shared.ctx.emit(SequenceEvent::Enabled);

        let generation = self.shared.generation.get();
        for node in &self.shared.nodes {
            if self.shared.generation.get() != generation {
                tracing::debug!(sequence = self.name(), "reset during enable, stopping");
                break;
            }
            node.try_enable();
        }
    }

    fn handle_condition_changed(&self, met: bool) {
        if met {
            self.enable();
        } else if self.shared.options.reset_on_condition_lost {
            tracing::info!(sequence = self.name(), "gating condition lost");
            self.reset_sequence();
        }
    }

    /// Abort everything in flight and return every node to Disabled
    pub fn reset_sequence(&self) {
        if self.shared.resetting.replace(true) {
            return;
        }
        self.shared.generation.set(self.shared.generation.get() + 1);
        for node in &self.shared.nodes {
            node.reset();
        }
        self.shared.resetting.set(false);
        tracing::debug!(sequence = self.name(), "sequence reset");
        self.shared.ctx.emit(SequenceEvent::Reset);
    }

    /// Report a failure and reset the whole sequence
    pub fn fail(&self, node: Option<NodeId>, error: TokenError) {
        tracing::warn!(
            sequence = self.name(),
            node = ?node.map(|id| id.0),
            %error,
            "sequence failed, resetting"
        );
        self.shared.ctx.emit(SequenceEvent::Failed { node, error });
        self.reset_sequence();
    }

    /// Stop observing the gating condition and reset. `initialize` re-arms.
    pub fn disarm(&self) {
        let generation = self.shared.generation.get();
        if let Some(gate) = &self.shared.condition {
            gate.set_enabled(false);
        }
        if self.shared.generation.get() == generation {
            self.reset_sequence();
        }
    }

    pub fn snapshot(&self) -> SequenceSnapshot {
        SequenceSnapshot {
            name: self.name().to_string(),
            eligible: self.is_eligible(),
            nodes: self.shared.nodes.iter().map(Node::snapshot).collect(),
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("name", &self.name())
            .field("nodes", &self.shared.nodes)
            .finish()
    }
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
