// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic validation for runbooks.
//!
//! Parsing only checks shape. This catches graphs that parse but cannot be
//! built: sequences without nodes, clashing node ids and blank type tags.

use crate::{ItemDef, Runbook, SequenceDef};
use std::collections::HashSet;

/// Collection of validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Runbook validation failed with {} error(s):",
            self.errors.len()
        )?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A single validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Sequence defines no nodes
    NoNodes { sequence: String },
    /// Two nodes in one sequence share an id
    DuplicateNodeId { sequence: String, id: u32 },
    /// Condition or action entry with a blank `type`
    EmptyTypeTag { sequence: String, location: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoNodes { sequence } => {
                write!(f, "Sequence '{}' has no nodes", sequence)
            }
            ValidationError::DuplicateNodeId { sequence, id } => {
                write!(f, "Node id {} is used twice in sequence '{}'", id, sequence)
            }
            ValidationError::EmptyTypeTag { sequence, location } => write!(
                f,
                "Empty type tag at {} in sequence '{}'",
                location, sequence
            ),
        }
    }
}

/// Validate a runbook, collecting every problem rather than stopping at the first
pub fn validate_runbook(runbook: &Runbook) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    for sequence in runbook.sequences.values() {
        validate_sequence(sequence, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

fn validate_sequence(sequence: &SequenceDef, errors: &mut Vec<ValidationError>) {
    if sequence.nodes.is_empty() {
        errors.push(ValidationError::NoNodes {
            sequence: sequence.name.clone(),
        });
    }

    if let Some(condition) = &sequence.condition {
        check_item(sequence, condition, "condition".to_string(), errors);
    }

    let mut seen = HashSet::new();
    for node in &sequence.nodes {
        if !seen.insert(node.id) {
            errors.push(ValidationError::DuplicateNodeId {
                sequence: sequence.name.clone(),
                id: node.id,
            });
        }
        for (i, item) in node.conditions.iter().enumerate() {
            check_item(
                sequence,
                item,
                format!("node {} conditions[{}]", node.id, i),
                errors,
            );
        }
        for (i, item) in node.actions.iter().enumerate() {
            check_item(
                sequence,
                item,
                format!("node {} actions[{}]", node.id, i),
                errors,
            );
        }
    }
}

fn check_item(
    sequence: &SequenceDef,
    item: &ItemDef,
    location: String,
    errors: &mut Vec<ValidationError>,
) {
    if item.kind.trim().is_empty() {
        errors.push(ValidationError::EmptyTypeTag {
            sequence: sequence.name.clone(),
            location,
        });
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
