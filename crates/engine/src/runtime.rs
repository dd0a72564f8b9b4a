// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async host loop around the director

use crate::director::{Director, HostEvent, SequenceStatus};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// Runtime knobs for the host loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// How often timers are polled
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
        }
    }
}

/// Inbound message for [`Director::run`]
#[derive(Debug)]
pub enum Request {
    Event(HostEvent),
    /// Reply with the current status of every sequence
    Status(oneshot::Sender<Vec<SequenceStatus>>),
}

impl From<HostEvent> for Request {
    fn from(event: HostEvent) -> Self {
        Request::Event(event)
    }
}

impl Director {
    /// Drive the director until every request sender is dropped.
    ///
    /// Merges a tick interval with inbound requests on the current task; the
    /// director is `!Send`, so run it with `block_on` or on a `LocalSet`.
    pub async fn run(&mut self, mut requests: mpsc::UnboundedReceiver<Request>, config: &RuntimeConfig) {
        let mut ticker = tokio::time::interval(config.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            tick_ms = config.tick_interval.as_millis() as u64,
            "host loop started"
        );

        loop {
            tokio::select! {
                request = requests.recv() => match request {
                    Some(Request::Event(event)) => {
                        if let Err(e) = self.handle(event) {
                            tracing::warn!(error = %e, "host event rejected");
                        }
                    }
                    Some(Request::Status(reply)) => {
                        if reply.send(self.status()).is_err() {
                            tracing::debug!("status requester went away");
                        }
                    }
                    None => break,
                },
                _ = ticker.tick() => {
                    if let Err(e) = self.handle(HostEvent::Tick) {
                        tracing::warn!(error = %e, "tick failed");
                    }
                }
            }
        }

        tracing::info!("host loop stopped");
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
