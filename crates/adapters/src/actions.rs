// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in actions over host services

use crate::host::{FlagStore, HostMessage, Outbox, SignalHub, Timers};
use cue_core::{Action, AsyncToken, NodeContext, TokenError};
use std::time::Duration;

/// Succeeds after a delay. Aborting cancels the timer.
pub struct WaitAction {
    duration: Duration,
    timers: Timers,
}

impl WaitAction {
    pub fn new(timers: Timers, duration: Duration) -> Self {
        Self { duration, timers }
    }
}

impl Action for WaitAction {
    fn kind(&self) -> &str {
        "wait"
    }

    fn act(&self) -> AsyncToken {
        if self.duration.is_zero() {
            return AsyncToken::succeeded();
        }
        let token = AsyncToken::pending();
        let resolve = token.clone();
        let id = self.timers.schedule(self.duration, move || resolve.succeed());
        let timers = self.timers.clone();
        token.on_abort(move || {
            timers.cancel(id);
        });
        token
    }
}

/// Sets a host flag and succeeds immediately
pub struct SetFlagAction {
    flag: String,
    value: bool,
    flags: FlagStore,
}

impl SetFlagAction {
    pub fn new(flags: FlagStore, flag: impl Into<String>, value: bool) -> Self {
        Self {
            flag: flag.into(),
            value,
            flags,
        }
    }
}

impl Action for SetFlagAction {
    fn kind(&self) -> &str {
        "set_flag"
    }

    fn act(&self) -> AsyncToken {
        self.flags.set(&self.flag, self.value);
        AsyncToken::succeeded()
    }
}

/// Sends a message to the host. Fails if nobody is listening.
pub struct EmitAction {
    message: String,
    outbox: Outbox,
    origin: Option<NodeContext>,
}

impl EmitAction {
    pub fn new(outbox: Outbox, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outbox,
            origin: None,
        }
    }
}

impl Action for EmitAction {
    fn kind(&self) -> &str {
        "emit"
    }

    fn initialize(&mut self, ctx: &NodeContext) {
        self.origin = Some(ctx.clone());
    }

    fn act(&self) -> AsyncToken {
        let message = HostMessage::Emit {
            sequence: self
                .origin
                .as_ref()
                .map(|ctx| ctx.sequence_name().to_string())
                .unwrap_or_default(),
            node: self
                .origin
                .as_ref()
                .and_then(NodeContext::node_id)
                .map(|id| id.0),
            message: self.message.clone(),
        };
        if self.outbox.send(message) {
            AsyncToken::succeeded()
        } else {
            AsyncToken::failed(TokenError::unavailable("host outbox is closed"))
        }
    }
}

/// Succeeds the next time a signal is raised
pub struct AwaitSignalAction {
    signal: String,
    hub: SignalHub,
}

impl AwaitSignalAction {
    pub fn new(hub: SignalHub, signal: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            hub,
        }
    }
}

impl Action for AwaitSignalAction {
    fn kind(&self) -> &str {
        "await_signal"
    }

    fn act(&self) -> AsyncToken {
        let token = AsyncToken::pending();
        let resolve = token.clone();
        let id = self.hub.subscribe(&self.signal, move || resolve.succeed());

        let hub = self.hub.clone();
        token.ready(move |_| {
            hub.unsubscribe(id);
        });
        let hub = self.hub.clone();
        token.on_abort(move || {
            hub.unsubscribe(id);
        });
        token
    }
}

/// Writes a log line and succeeds
pub struct LogAction {
    message: String,
    origin: Option<NodeContext>,
}

impl LogAction {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            origin: None,
        }
    }
}

impl Action for LogAction {
    fn kind(&self) -> &str {
        "log"
    }

    fn initialize(&mut self, ctx: &NodeContext) {
        self.origin = Some(ctx.clone());
    }

    fn act(&self) -> AsyncToken {
        let sequence = self.origin.as_ref().map(NodeContext::sequence_name);
        let node = self
            .origin
            .as_ref()
            .and_then(NodeContext::node_id)
            .map(|id| id.0);
        tracing::info!(sequence, node, message = %self.message, "log action");
        AsyncToken::succeeded()
    }
}

/// Always fails with the configured reason
pub struct FailAction {
    reason: String,
}

impl FailAction {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Action for FailAction {
    fn kind(&self) -> &str {
        "fail"
    }

    fn act(&self) -> AsyncToken {
        AsyncToken::failed(TokenError::failed(self.reason.clone()))
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
