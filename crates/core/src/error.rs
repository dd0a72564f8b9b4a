// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure payloads carried by resolved tokens

use serde::Serialize;
use thiserror::Error;

/// Why a pending operation resolved as a failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum TokenError {
    /// The action reported failure
    #[error("action failed: {0}")]
    Failed(String),
    /// A host capability the action depends on is gone
    #[error("host capability unavailable: {0}")]
    Unavailable(String),
}

impl TokenError {
    pub fn failed(reason: impl Into<String>) -> Self {
        TokenError::Failed(reason.into())
    }

    pub fn unavailable(what: impl Into<String>) -> Self {
        TokenError::Unavailable(what.into())
    }
}
