// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequence definitions

use cue_core::{NodeFlags, NodeId, SequenceOptions};
use serde::{Deserialize, Serialize};

/// A condition or action entry: a type tag plus uninterpreted parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Factory key, written as `type = "..."`
    #[serde(rename = "type")]
    pub kind: String,
    /// Everything else in the entry
    #[serde(flatten)]
    pub params: toml::Table,
}

impl ItemDef {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: toml::Table::new(),
        }
    }

    /// Add a parameter
    pub fn with(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// A node definition with its id and name resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sequential: bool,
    #[serde(default, rename = "final")]
    pub final_node: bool,
    #[serde(default)]
    pub checkpoint: bool,
    #[serde(default)]
    pub fail_on_error: bool,
    /// Evaluated in order as an AND-chain
    #[serde(default)]
    pub conditions: Vec<ItemDef>,
    /// Invoked in order
    #[serde(default)]
    pub actions: Vec<ItemDef>,
}

impl NodeDef {
    pub fn node_id(&self) -> NodeId {
        NodeId(self.id)
    }

    pub fn flags(&self) -> NodeFlags {
        NodeFlags {
            sequential: self.sequential,
            final_node: self.final_node,
            checkpoint: self.checkpoint,
            fail_on_error: self.fail_on_error,
        }
    }
}

/// A sequence definition from the runbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceDef {
    pub name: String,
    /// May run again after a final node completed
    pub repeatable: bool,
    /// Reset every node when the gating condition stops being met
    pub reset_on_condition_lost: bool,
    /// Optional gating condition for the whole sequence
    pub condition: Option<ItemDef>,
    pub nodes: Vec<NodeDef>,
}

impl SequenceDef {
    pub fn options(&self) -> SequenceOptions {
        SequenceOptions {
            reset_on_condition_lost: self.reset_on_condition_lost,
        }
    }

    /// Nodes flagged final
    pub fn final_nodes(&self) -> impl Iterator<Item = &NodeDef> {
        self.nodes.iter().filter(|n| n.final_node)
    }
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
