// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot named host signals

use cue_core::{ListenerId, Listeners};
use std::fmt;

/// Delivers raised signals to whoever is subscribed at that moment.
/// Nothing is buffered. Clones share subscribers.
#[derive(Clone, Default)]
pub struct SignalHub {
    listeners: Listeners<String>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self, signal: &str) {
        tracing::debug!(signal, subscribers = self.listeners.len(), "signal raised");
        self.listeners.emit(&signal.to_string());
    }

    /// Call `callback` each time `signal` is raised
    pub fn subscribe(&self, signal: &str, callback: impl Fn() + 'static) -> ListenerId {
        let wanted = signal.to_string();
        self.listeners.subscribe(move |raised: &String| {
            if *raised == wanted {
                callback();
            }
        })
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn subscribers(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for SignalHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalHub")
            .field("subscribers", &self.subscribers())
            .finish()
    }
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
