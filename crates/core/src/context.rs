// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit context handed to actions and conditions
//!
//! Replaces process-wide manager lookups: everything an item needs to know
//! about where it lives arrives through these values at initialization.

use crate::error::TokenError;
use crate::node::NodeId;
use crate::signal::{ListenerId, Listeners};
use serde::Serialize;
use std::rc::Rc;

/// Lifecycle notifications published by a sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SequenceEvent {
    /// `initialize` ran
    Armed,
    /// The sequence became eligible and tried to enable its nodes
    Enabled,
    /// A node invoked its actions
    NodeActing { node: NodeId },
    /// A node finished its actions
    NodeCompleted {
        node: NodeId,
        final_node: bool,
        checkpoint: bool,
    },
    /// A fail-on-error node failed; a reset follows
    Failed {
        node: Option<NodeId>,
        error: TokenError,
    },
    /// Every node returned to disabled
    Reset,
}

/// Per-sequence context shared by all of its nodes
#[derive(Clone)]
pub struct SequenceContext {
    name: Rc<str>,
    events: Listeners<SequenceEvent>,
}

impl SequenceContext {
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: Rc::from(name),
            events: Listeners::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe to this sequence's lifecycle events
    pub fn on_event(&self, callback: impl Fn(&SequenceEvent) + 'static) -> ListenerId {
        self.events.subscribe(callback)
    }

    pub(crate) fn emit(&self, event: SequenceEvent) {
        self.events.emit(&event);
    }

    pub(crate) fn for_node(&self, id: NodeId, name: &str) -> NodeContext {
        NodeContext {
            sequence: self.clone(),
            node: Some((id, Rc::from(name))),
        }
    }

    pub(crate) fn top_level(&self) -> NodeContext {
        NodeContext {
            sequence: self.clone(),
            node: None,
        }
    }
}

impl std::fmt::Debug for SequenceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceContext")
            .field("name", &self.name)
            .finish()
    }
}

/// Context for one item: its sequence, and its node unless it gates the
/// whole sequence
#[derive(Clone, Debug)]
pub struct NodeContext {
    sequence: SequenceContext,
    node: Option<(NodeId, Rc<str>)>,
}

impl NodeContext {
    pub fn sequence(&self) -> &SequenceContext {
        &self.sequence
    }

    pub fn sequence_name(&self) -> &str {
        self.sequence.name()
    }

    /// None for the sequence-level gating condition
    pub fn node_id(&self) -> Option<NodeId> {
        self.node.as_ref().map(|(id, _)| *id)
    }

    pub fn node_name(&self) -> Option<&str> {
        self.node.as_ref().map(|(_, name)| &**name)
    }
}
