// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named boolean flags with change notifications

use cue_core::{ListenerId, Listeners};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A flag whose value actually changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagChange {
    pub flag: String,
    pub value: bool,
}

#[derive(Default)]
struct FlagsInner {
    values: RefCell<BTreeMap<String, bool>>,
    changed: Listeners<FlagChange>,
}

/// Host flag store. Unset flags read as false. Clones share state.
#[derive(Clone, Default)]
pub struct FlagStore {
    inner: Rc<FlagsInner>,
}

impl FlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, flag: &str) -> bool {
        self.inner
            .values
            .borrow()
            .get(flag)
            .copied()
            .unwrap_or(false)
    }

    /// Set a flag, notifying subscribers only when the value changes
    pub fn set(&self, flag: &str, value: bool) {
        let previous = self
            .inner
            .values
            .borrow_mut()
            .insert(flag.to_string(), value);
        if previous.unwrap_or(false) == value {
            return;
        }
        tracing::debug!(flag, value, "flag changed");
        self.inner.changed.emit(&FlagChange {
            flag: flag.to_string(),
            value,
        });
    }

    pub fn on_change(&self, callback: impl Fn(&FlagChange) + 'static) -> ListenerId {
        self.inner.changed.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.changed.unsubscribe(id)
    }
}

impl fmt::Debug for FlagStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.values.borrow().iter()).finish()
    }
}

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;
