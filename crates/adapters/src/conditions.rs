// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in conditions over host services

use crate::host::{FlagStore, SignalHub, TimerId, Timers};
use cue_core::{Condition, ListenerId, MetHandle, NodeContext};
use std::time::Duration;

/// Met while a flag holds the expected value
pub struct FlagCondition {
    flag: String,
    value: bool,
    flags: FlagStore,
    met: Option<MetHandle>,
    subscription: Option<ListenerId>,
}

impl FlagCondition {
    pub fn new(flags: FlagStore, flag: impl Into<String>, value: bool) -> Self {
        Self {
            flag: flag.into(),
            value,
            flags,
            met: None,
            subscription: None,
        }
    }
}

impl Condition for FlagCondition {
    fn kind(&self) -> &str {
        "flag"
    }

    fn initialize(&mut self, _ctx: &NodeContext, met: MetHandle) {
        self.met = Some(met);
    }

    fn on_enable_changed(&mut self, enabled: bool) {
        let Some(met) = &self.met else {
            return;
        };
        if enabled {
            let handle = met.clone();
            let flag = self.flag.clone();
            let expected = self.value;
            self.subscription = Some(self.flags.on_change(move |change| {
                if change.flag == flag {
                    handle.set(change.value == expected);
                }
            }));
            met.set(self.flags.get(&self.flag) == self.value);
        } else if let Some(id) = self.subscription.take() {
            self.flags.unsubscribe(id);
        }
    }
}

/// Met once `after` has elapsed since the condition was enabled
pub struct TimerCondition {
    after: Duration,
    timers: Timers,
    met: Option<MetHandle>,
    timer: Option<TimerId>,
}

impl TimerCondition {
    pub fn new(timers: Timers, after: Duration) -> Self {
        Self {
            after,
            timers,
            met: None,
            timer: None,
        }
    }
}

impl Condition for TimerCondition {
    fn kind(&self) -> &str {
        "timer"
    }

    fn initialize(&mut self, _ctx: &NodeContext, met: MetHandle) {
        self.met = Some(met);
    }

    fn on_enable_changed(&mut self, enabled: bool) {
        if let Some(id) = self.timer.take() {
            self.timers.cancel(id);
        }
        if !enabled {
            return;
        }
        if let Some(met) = &self.met {
            let handle = met.clone();
            self.timer = Some(self.timers.schedule(self.after, move || handle.set(true)));
        }
    }
}

/// Latches met when a signal is raised while enabled
pub struct SignalCondition {
    signal: String,
    hub: SignalHub,
    met: Option<MetHandle>,
    subscription: Option<ListenerId>,
}

impl SignalCondition {
    pub fn new(hub: SignalHub, signal: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            hub,
            met: None,
            subscription: None,
        }
    }
}

impl Condition for SignalCondition {
    fn kind(&self) -> &str {
        "signal"
    }

    fn initialize(&mut self, _ctx: &NodeContext, met: MetHandle) {
        self.met = Some(met);
    }

    fn on_enable_changed(&mut self, enabled: bool) {
        if enabled {
            if let Some(met) = &self.met {
                let handle = met.clone();
                self.subscription = Some(self.hub.subscribe(&self.signal, move || handle.set(true)));
            }
        } else if let Some(id) = self.subscription.take() {
            self.hub.unsubscribe(id);
        }
    }
}

/// Met whenever enabled
#[derive(Default)]
pub struct AlwaysCondition {
    met: Option<MetHandle>,
}

impl Condition for AlwaysCondition {
    fn kind(&self) -> &str {
        "always"
    }

    fn initialize(&mut self, _ctx: &NodeContext, met: MetHandle) {
        self.met = Some(met);
    }

    fn on_enable_changed(&mut self, enabled: bool) {
        if let (true, Some(met)) = (enabled, &self.met) {
            met.set(true);
        }
    }
}

#[cfg(test)]
#[path = "conditions_tests.rs"]
mod tests;
