// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node state machine
//!
//! A node owns an ordered condition chain and an ordered action list.
//!
//! ```text
//! Disabled --enable--> Enabled(evaluating) --all met--> Active(acting) --resolved--> Complete
//!     ^                                                                                 |
//!     +----------------------------------- reset -------------------------------------+
//! ```
//!
//! Conditions form an AND-chain: the first is enabled with the node, each
//! later one only while its predecessor holds. Once every condition is met
//! the node invokes all actions, combines their tokens (`all_of` when
//! `fail_on_error`, `wait_all` otherwise) and completes when the combined
//! token resolves. A failure under `fail_on_error` goes to the owning
//! sequence, which resets every node.

use crate::action::Action;
use crate::combinator::{all_of, wait_all};
use crate::condition::{Condition, Gate};
use crate::context::{NodeContext, SequenceContext, SequenceEvent};
use crate::error::TokenError;
use crate::sequence::{Sequence, SequenceShared};
use crate::signal::{ListenerId, Listeners};
use crate::snapshot::NodeSnapshot;
use crate::token::AsyncToken;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier of a node within its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

/// Declarative flags on a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    /// Wait for the preceding node to complete before enabling
    pub sequential: bool,
    /// Host metadata: completing this node finishes the sequence
    pub final_node: bool,
    /// Host metadata: progress marker
    pub checkpoint: bool,
    /// An action failure fails the whole sequence
    pub fail_on_error: bool,
}

/// A node under construction, before a sequence adopts it
pub struct NodeBuilder {
    id: NodeId,
    name: String,
    flags: NodeFlags,
    conditions: Vec<Box<dyn Condition>>,
    actions: Vec<Box<dyn Action>>,
}

impl NodeBuilder {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flags: NodeFlags::default(),
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn sequential(mut self, sequential: bool) -> Self {
        self.flags.sequential = sequential;
        self
    }

    pub fn final_node(mut self, final_node: bool) -> Self {
        self.flags.final_node = final_node;
        self
    }

    pub fn checkpoint(mut self, checkpoint: bool) -> Self {
        self.flags.checkpoint = checkpoint;
        self
    }

    pub fn fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.flags.fail_on_error = fail_on_error;
        self
    }

    pub fn condition(mut self, condition: Box<dyn Condition>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn action(mut self, action: Box<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Initialize every item against the node context and wire condition
    /// notifications back into the node
    pub(crate) fn build(self, seq: &SequenceContext, sequence: Weak<SequenceShared>) -> Node {
        let ctx = seq.for_node(self.id, &self.name);
        let NodeBuilder {
            id,
            name,
            flags,
            conditions,
            mut actions,
        } = self;

        for action in &mut actions {
            action.initialize(&ctx);
        }

        let shared = Rc::new_cyclic(|weak: &Weak<NodeShared>| {
            let conditions = conditions
                .into_iter()
                .map(|condition| {
                    let mut gate = Gate::new(condition);
                    gate.initialize(&ctx);
                    let node = weak.clone();
                    gate.on_changed(move |_| {
                        if let Some(shared) = node.upgrade() {
                            Node { shared }.handle_conditions_changed();
                        }
                    });
                    gate
                })
                .collect();

            NodeShared {
                id,
                name,
                flags,
                ctx,
                conditions,
                actions,
                sequence,
                predecessor: RefCell::new(None),
                wired: Cell::new(false),
                enabled: Cell::new(false),
                complete: Cell::new(false),
                acting: Cell::new(false),
                outstanding: RefCell::new(None),
                epoch: Cell::new(0),
                evaluating: Cell::new(false),
                dirty: Cell::new(false),
                completed: Listeners::new(),
            }
        });
        Node { shared }
    }
}

pub(crate) struct NodeShared {
    id: NodeId,
    name: String,
    flags: NodeFlags,
    ctx: NodeContext,
    conditions: Vec<Gate>,
    actions: Vec<Box<dyn Action>>,
    sequence: Weak<SequenceShared>,
    predecessor: RefCell<Option<Weak<NodeShared>>>,
    wired: Cell<bool>,
    enabled: Cell<bool>,
    complete: Cell<bool>,
    /// Set while `act` is invoking actions, before the token exists
    acting: Cell<bool>,
    outstanding: RefCell<Option<AsyncToken>>,
    /// Bumped on every reset; tags the token of one activation cycle
    epoch: Cell<u64>,
    evaluating: Cell<bool>,
    dirty: Cell<bool>,
    completed: Listeners<NodeId>,
}

/// Handle to a node owned by a sequence. Clones refer to the same node.
#[derive(Clone)]
pub struct Node {
    shared: Rc<NodeShared>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.shared.id
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn flags(&self) -> NodeFlags {
        self.shared.flags
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.get()
    }

    pub fn is_complete(&self) -> bool {
        self.shared.complete.get()
    }

    /// True while an unresolved token is outstanding
    pub fn is_active(&self) -> bool {
        self.shared.acting.get()
            || self
                .shared
                .outstanding
                .borrow()
                .as_ref()
                .is_some_and(|token| !token.is_ready())
    }

    /// The combined token of the current activation, if any
    pub fn outstanding(&self) -> Option<AsyncToken> {
        self.shared.outstanding.borrow().clone()
    }

    pub fn conditions(&self) -> &[Gate] {
        &self.shared.conditions
    }

    pub fn has_predecessor(&self) -> bool {
        self.predecessor().is_some()
    }

    /// Subscribe to this node becoming complete
    pub fn on_complete(&self, callback: impl Fn(&NodeId) + 'static) -> ListenerId {
        self.shared.completed.subscribe(callback)
    }

    fn predecessor(&self) -> Option<Node> {
        self.shared
            .predecessor
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|shared| Node { shared })
    }

    /// Chain this node after `predecessor` when sequential. Idempotent.
    pub(crate) fn wire(&self, predecessor: Option<&Node>) {
        if self.shared.wired.replace(true) || !self.shared.flags.sequential {
            return;
        }
        let Some(predecessor) = predecessor else {
            return;
        };

        *self.shared.predecessor.borrow_mut() = Some(Rc::downgrade(&predecessor.shared));
        let next = Rc::downgrade(&self.shared);
        predecessor.on_complete(move |_| {
            if let Some(shared) = next.upgrade() {
                Node { shared }.set_enabled(true);
            }
        });
        tracing::trace!(
            sequence = self.shared.ctx.sequence_name(),
            node = %self.shared.id,
            after = %predecessor.id(),
            "chained"
        );
    }

    /// Enable unless a predecessor exists and is not complete yet.
    /// Returns whether the node was enabled.
    pub fn try_enable(&self) -> bool {
        if let Some(predecessor) = self.predecessor() {
            if !predecessor.is_complete() {
                tracing::trace!(
                    sequence = self.shared.ctx.sequence_name(),
                    node = %self.shared.id,
                    "waiting on predecessor"
                );
                return false;
            }
        }
        self.set_enabled(true);
        true
    }

    /// Set the enabled flag directly and re-evaluate the condition chain
    pub fn set_enabled(&self, enabled: bool) {
        if self.shared.enabled.replace(enabled) != enabled {
            tracing::debug!(
                sequence = self.shared.ctx.sequence_name(),
                node = %self.shared.id,
                enabled,
                "node enable changed"
            );
        }
        self.evaluate();
    }

    fn handle_conditions_changed(&self) {
        if self.is_complete() || self.is_active() {
            return;
        }
        self.evaluate();
    }

    /// Re-run the condition chain until it settles, acting when all met.
    ///
    /// A notification arriving mid-evaluation only marks the node dirty;
    /// the outer pass picks it up.
    fn evaluate(&self) {
        if self.shared.evaluating.get() {
            self.shared.dirty.set(true);
            return;
        }
        self.shared.evaluating.set(true);
        loop {
            self.shared.dirty.set(false);
            let enabled = self.shared.enabled.get();
            let all_met = self.update_conditions(enabled);
            if enabled && all_met && !self.is_complete() && !self.is_active() {
                self.act();
            }
            if !self.shared.dirty.get() {
                break;
            }
        }
        self.shared.evaluating.set(false);
    }

    /// Walk the AND-chain; returns the final running-met flag
    fn update_conditions(&self, input: bool) -> bool {
        let mut met = input;
        for gate in &self.shared.conditions {
            gate.set_enabled(met);
            met = gate.is_met();
        }
        met
    }

    fn act(&self) {
        if self.is_complete() || self.is_active() {
            tracing::trace!(node = %self.shared.id, "act suppressed");
            return;
        }
        let epoch = self.shared.epoch.get();
        tracing::info!(
            sequence = self.shared.ctx.sequence_name(),
            node = %self.shared.id,
            name = %self.shared.name,
            actions = self.shared.actions.len(),
            "node acting"
        );
        self.shared
            .ctx
            .sequence()
            .emit(SequenceEvent::NodeActing {
                node: self.shared.id,
            });

        self.shared.acting.set(true);
        let tokens: Vec<AsyncToken> = self.shared.actions.iter().map(|a| a.act()).collect();
        self.shared.acting.set(false);

        if self.shared.epoch.get() != epoch || !self.shared.enabled.get() {
            tracing::debug!(
                sequence = self.shared.ctx.sequence_name(),
                node = %self.shared.id,
                "reset while acting, aborting fresh tokens"
            );
            for token in &tokens {
                token.abort();
            }
            return;
        }

        let token = if self.shared.flags.fail_on_error {
            all_of(tokens)
        } else {
            wait_all(tokens)
        };
        *self.shared.outstanding.borrow_mut() = Some(token.clone());

        let node = Rc::downgrade(&self.shared);
        token.ready(move |token| {
            if let Some(shared) = node.upgrade() {
                Node { shared }.handle_resolved(epoch, token);
            }
        });
    }

    fn handle_resolved(&self, epoch: u64, token: &AsyncToken) {
        let current = self
            .shared
            .outstanding
            .borrow()
            .as_ref()
            .is_some_and(|outstanding| outstanding.ptr_eq(token));
        if self.shared.epoch.get() != epoch || !current {
            tracing::debug!(
                sequence = self.shared.ctx.sequence_name(),
                node = %self.shared.id,
                "discarding stale resolution"
            );
            return;
        }

        match token.error() {
            Some(error) if self.shared.flags.fail_on_error => {
                // Keep the token outstanding so the reset aborts unresolved parts
                self.report_failure(error);
            }
            _ => {
                let finished = self.shared.outstanding.borrow_mut().take();
                drop(finished);
                self.mark_complete();
            }
        }
    }

    fn report_failure(&self, error: TokenError) {
        match self.shared.sequence.upgrade() {
            Some(shared) => Sequence::from_shared(shared).fail(Some(self.shared.id), error),
            None => {
                tracing::error!(
                    sequence = self.shared.ctx.sequence_name(),
                    node = %self.shared.id,
                    %error,
                    "node has no owning sequence"
                );
                self.reset();
            }
        }
    }

    fn mark_complete(&self) {
        if self.shared.complete.replace(true) {
            return;
        }
        tracing::info!(
            sequence = self.shared.ctx.sequence_name(),
            node = %self.shared.id,
            name = %self.shared.name,
            "node complete"
        );
        self.shared
            .ctx
            .sequence()
            .emit(SequenceEvent::NodeCompleted {
                node: self.shared.id,
                final_node: self.shared.flags.final_node,
                checkpoint: self.shared.flags.checkpoint,
            });
        self.shared.completed.emit(&self.shared.id);
    }

    /// Abort outstanding work and return to Disabled
    pub fn reset(&self) {
        self.shared.epoch.set(self.shared.epoch.get() + 1);
        let outstanding = self.shared.outstanding.borrow_mut().take();
        if let Some(token) = outstanding {
            token.abort();
        }
        self.shared.complete.set(false);
        self.shared.enabled.set(false);
        self.evaluate();
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.shared.id,
            name: self.shared.name.clone(),
            flags: self.shared.flags,
            enabled: self.is_enabled(),
            active: self.is_active(),
            complete: self.is_complete(),
            conditions_met: self.shared.conditions.iter().map(Gate::is_met).collect(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.shared.id)
            .field("name", &self.shared.name)
            .field("enabled", &self.is_enabled())
            .field("active", &self.is_active())
            .field("complete", &self.is_complete())
            .finish()
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
