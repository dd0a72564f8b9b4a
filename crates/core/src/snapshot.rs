// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time views of a sequence for status output

use crate::node::{NodeFlags, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub flags: NodeFlags,
    pub enabled: bool,
    pub active: bool,
    pub complete: bool,
    /// `met` of each condition in chain order
    pub conditions_met: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceSnapshot {
    pub name: String,
    /// No gating condition, or the gating condition is met
    pub eligible: bool,
    pub nodes: Vec<NodeSnapshot>,
}

impl SequenceSnapshot {
    pub fn completed(&self) -> usize {
        self.nodes.iter().filter(|n| n.complete).count()
    }

    pub fn active(&self) -> usize {
        self.nodes.iter().filter(|n| n.active).count()
    }
}
