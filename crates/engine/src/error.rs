// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use cue_adapters::FactoryError;
use thiserror::Error;

/// Errors that can occur building or driving sequences
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("sequence {sequence}: gating condition: {source}")]
    Condition {
        sequence: String,
        #[source]
        source: FactoryError,
    },
    #[error("sequence {sequence}, node {node}: {source}")]
    Node {
        sequence: String,
        node: u32,
        #[source]
        source: FactoryError,
    },
    #[error("sequence not found: {0}")]
    SequenceNotFound(String),
    #[error("sequence already loaded: {0}")]
    AlreadyLoaded(String),
    #[error("sequence {0} has finished and is not repeatable")]
    NotRepeatable(String),
}
