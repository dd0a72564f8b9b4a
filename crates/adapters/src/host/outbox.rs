// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Messages sent from sequences to the outside world

use serde::Serialize;
use tokio::sync::mpsc;

/// Something a sequence tells its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMessage {
    Emit {
        sequence: String,
        node: Option<u32>,
        message: String,
    },
}

/// Sending half of the host message channel
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<HostMessage>,
}

impl Outbox {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// An outbox nobody reads; every send reports the host as gone
    pub fn detached() -> Self {
        Self::new().0
    }

    /// Returns false if the receiving side has gone away
    pub fn send(&self, message: HostMessage) -> bool {
        match self.tx.send(message) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(message = ?e.0, "outbox closed, message dropped");
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
