// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conditions: boolean gates over host state
//!
//! An implementation only starts and stops observing in
//! [`Condition::on_enable_changed`] and reports its criterion through the
//! [`MetHandle`] it receives at initialization. The [`Gate`] wrapping it
//! owns the lifecycle and enforces `!enabled => !met` on every disable.

use crate::context::NodeContext;
use crate::signal::{ListenerId, Listeners};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Capability implemented by concrete conditions
pub trait Condition {
    /// Type tag, used for logging
    fn kind(&self) -> &str;

    /// Called once before first use. Keep `met` to report changes.
    fn initialize(&mut self, _ctx: &NodeContext, _met: MetHandle) {}

    /// Start (`true`) or stop (`false`) observing host state
    fn on_enable_changed(&mut self, enabled: bool);
}

struct MetState {
    enabled: Cell<bool>,
    met: Cell<bool>,
    changed: Listeners<bool>,
}

/// Writable `met` output of one condition. Clones share state.
#[derive(Clone)]
pub struct MetHandle {
    inner: Rc<MetState>,
}

impl MetHandle {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(MetState {
                enabled: Cell::new(false),
                met: Cell::new(false),
                changed: Listeners::new(),
            }),
        }
    }

    /// Report the criterion. `true` is ignored while the gate is disabled.
    pub fn set(&self, met: bool) {
        if met && !self.inner.enabled.get() {
            tracing::trace!("ignoring met while disabled");
            return;
        }
        self.transition(met);
    }

    pub fn is_met(&self) -> bool {
        self.inner.met.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    fn transition(&self, met: bool) {
        if self.inner.met.get() == met {
            return;
        }
        self.inner.met.set(met);
        self.inner.changed.emit(&met);
    }
}

impl Default for MetHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetHandle")
            .field("enabled", &self.inner.enabled.get())
            .field("met", &self.inner.met.get())
            .finish()
    }
}

/// Lifecycle wrapper around one condition
pub struct Gate {
    kind: String,
    condition: RefCell<Box<dyn Condition>>,
    met: MetHandle,
}

impl Gate {
    pub fn new(condition: Box<dyn Condition>) -> Self {
        Self {
            kind: condition.kind().to_string(),
            condition: RefCell::new(condition),
            met: MetHandle::new(),
        }
    }

    pub(crate) fn initialize(&mut self, ctx: &NodeContext) {
        self.condition
            .get_mut()
            .initialize(ctx, self.met.clone());
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.met.is_enabled()
    }

    pub fn is_met(&self) -> bool {
        self.met.is_met()
    }

    /// Subscribe to `met` transitions
    pub fn on_changed(&self, callback: impl Fn(&bool) + 'static) -> ListenerId {
        self.met.inner.changed.subscribe(callback)
    }

    /// Enable or disable observation.
    ///
    /// The condition is told only on an actual transition. Disabling always
    /// forces `met` to false afterwards, whatever the watched state says.
    pub fn set_enabled(&self, enabled: bool) {
        if self.met.inner.enabled.get() != enabled {
            self.met.inner.enabled.set(enabled);
            self.notify_condition();
        }
        if !enabled {
            self.met.transition(false);
        }
    }

    // A nested change made while the condition is busy is replayed by the
    // outermost call once the condition returns.
    fn notify_condition(&self) {
        let Ok(mut condition) = self.condition.try_borrow_mut() else {
            tracing::debug!(kind = %self.kind, "enable change deferred to outer call");
            return;
        };
        let mut told = !self.met.inner.enabled.get();
        loop {
            let current = self.met.inner.enabled.get();
            if current == told {
                break;
            }
            condition.on_enable_changed(current);
            told = current;
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("kind", &self.kind)
            .field("met", &self.met)
            .finish()
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
