// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning sequence definitions into live sequences

use crate::error::EngineError;
use cue_adapters::{Factory, HostServices};
use cue_core::{NodeBuilder, Sequence};
use cue_runbook::SequenceDef;

/// Build a live sequence from its definition.
///
/// Every condition and action is constructed through `factory` before the
/// sequence exists, so a bad definition never yields a half-built graph.
pub fn build_sequence(
    def: &SequenceDef,
    factory: &Factory,
    host: &HostServices,
) -> Result<Sequence, EngineError> {
    let condition = def
        .condition
        .as_ref()
        .map(|item| factory.build_condition(item, host))
        .transpose()
        .map_err(|source| EngineError::Condition {
            sequence: def.name.clone(),
            source,
        })?;

    let mut nodes = Vec::with_capacity(def.nodes.len());
    for node in &def.nodes {
        let node_err = |source| EngineError::Node {
            sequence: def.name.clone(),
            node: node.id,
            source,
        };
        let mut builder = NodeBuilder::new(node.node_id(), node.name.as_str()).flags(node.flags());
        for item in &node.conditions {
            builder = builder.condition(factory.build_condition(item, host).map_err(node_err)?);
        }
        for item in &node.actions {
            builder = builder.action(factory.build_action(item, host).map_err(node_err)?);
        }
        nodes.push(builder);
    }

    tracing::debug!(
        sequence = %def.name,
        nodes = nodes.len(),
        gated = condition.is_some(),
        "sequence built"
    );
    Ok(Sequence::new(def.name.as_str(), def.options(), condition, nodes))
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
