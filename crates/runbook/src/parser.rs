// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runbook TOML parsing

use crate::{ItemDef, NodeDef, SequenceDef};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during runbook parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// A parsed runbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Runbook {
    pub sequences: BTreeMap<String, SequenceDef>,
}

impl Runbook {
    /// Get a sequence definition by name
    pub fn get_sequence(&self, name: &str) -> Option<&SequenceDef> {
        self.sequences.get(name)
    }

    /// Sequence names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSequence {
    #[serde(default = "default_true")]
    repeatable: bool,
    #[serde(default = "default_true")]
    reset_on_condition_lost: bool,
    #[serde(default)]
    condition: Option<ItemDef>,
    // [[sequence.X.node]] or nodes = [...]
    #[serde(default, alias = "nodes")]
    node: Vec<RawNode>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sequential: bool,
    #[serde(default, rename = "final")]
    final_node: bool,
    #[serde(default)]
    checkpoint: bool,
    #[serde(default)]
    fail_on_error: bool,
    #[serde(default)]
    conditions: Vec<ItemDef>,
    #[serde(default)]
    actions: Vec<ItemDef>,
}

/// Parse a runbook from TOML content
pub fn parse_runbook(content: &str) -> Result<Runbook, ParseError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("root must be a table".to_string()))?;

    if let Some(key) = table.keys().find(|key| key.as_str() != "sequence") {
        return Err(ParseError::InvalidFormat(format!(
            "unknown top-level section: {}",
            key
        )));
    }

    let mut runbook = Runbook::default();
    if let Some(sequences) = table.get("sequence") {
        let sequences = sequences
            .as_table()
            .ok_or_else(|| ParseError::InvalidFormat("sequence must be a table".to_string()))?;
        for (name, value) in sequences {
            let sequence = parse_sequence(name, value)?;
            runbook.sequences.insert(name.clone(), sequence);
        }
    }

    Ok(runbook)
}

fn parse_sequence(name: &str, value: &toml::Value) -> Result<SequenceDef, ParseError> {
    if !value.is_table() {
        return Err(ParseError::InvalidFormat(format!(
            "sequence.{} must be a table",
            name
        )));
    }
    let raw: RawSequence = value.clone().try_into().map_err(|e: toml::de::Error| {
        ParseError::InvalidFormat(format!("sequence.{}: {}", name, e))
    })?;

    // Nodes without an explicit id continue after the highest id seen so far
    let mut next_id = 0u32;
    let mut nodes = Vec::with_capacity(raw.node.len());
    for node in raw.node {
        let id = match node.id {
            Some(id) => id,
            None => next_id,
        };
        next_id = next_id.max(id.saturating_add(1));

        nodes.push(NodeDef {
            id,
            name: node.name.unwrap_or_else(|| format!("Node {}", id)),
            sequential: node.sequential,
            final_node: node.final_node,
            checkpoint: node.checkpoint,
            fail_on_error: node.fail_on_error,
            conditions: node.conditions,
            actions: node.actions,
        });
    }

    Ok(SequenceDef {
        name: name.to_string(),
        repeatable: raw.repeatable,
        reset_on_condition_lost: raw.reset_on_condition_lost,
        condition: raw.condition,
        nodes,
    })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
