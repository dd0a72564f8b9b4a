// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered callback lists for single-threaded notifications
//!
//! `Listeners` is the observer primitive behind condition changes, node
//! completion and sequence events. Callbacks run in registration order and
//! no internal borrow is held while they run, so a callback may subscribe,
//! unsubscribe or emit again without tripping a `RefCell` panic.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Handle identifying one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ListenerList<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Callback<T>)>,
}

/// Shared, ordered list of callbacks. Clones share the same list.
pub struct Listeners<T> {
    inner: Rc<RefCell<ListenerList<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenerList {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Append a callback; it fires after every callback registered before it
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> ListenerId {
        let mut list = self.inner.borrow_mut();
        let id = ListenerId(list.next_id);
        list.next_id += 1;
        list.entries.push((id, Rc::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut list = self.inner.borrow_mut();
        let before = list.entries.len();
        list.entries.retain(|(entry, _)| *entry != id);
        list.entries.len() != before
    }

    /// Invoke every callback registered at the time of the call
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.inner.borrow().entries.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
