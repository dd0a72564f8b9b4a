// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline timers driven by host ticks

use crate::clock::Clock;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Scheduled {
    id: TimerId,
    /// `None` when `now + after` is past the clock's range: never due
    deadline: Option<Instant>,
    callback: Box<dyn FnOnce()>,
}

struct TimersInner {
    clock: Rc<dyn Clock>,
    next_id: Cell<u64>,
    scheduled: RefCell<Vec<Scheduled>>,
}

/// Timer wheel polled by [`Timers::fire_due`]. Clones share the schedule.
#[derive(Clone)]
pub struct Timers {
    inner: Rc<TimersInner>,
}

impl Timers {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(TimersInner {
                clock,
                next_id: Cell::new(0),
                scheduled: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Run `callback` on the first `fire_due` at or after `now + after`
    pub fn schedule(&self, after: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        let id = TimerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        let deadline = self.inner.clock.now().checked_add(after);
        if deadline.is_none() {
            tracing::warn!(timer = id.0, ?after, "timer deadline out of range, it will never fire");
        }
        self.inner.scheduled.borrow_mut().push(Scheduled {
            id,
            deadline,
            callback: Box::new(callback),
        });
        tracing::trace!(timer = id.0, after_ms = after.as_millis() as u64, "timer scheduled");
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut scheduled = self.inner.scheduled.borrow_mut();
        let before = scheduled.len();
        scheduled.retain(|timer| timer.id != id);
        let removed = scheduled.len() != before;
        if removed {
            tracing::trace!(timer = id.0, "timer cancelled");
        }
        removed
    }

    /// Fire every timer that is due, earliest deadline first.
    ///
    /// Timers scheduled by a callback wait for the next call even when they
    /// are already due. Returns how many fired.
    pub fn fire_due(&self) -> usize {
        let boundary = self.inner.next_id.get();
        let mut fired = 0;
        loop {
            let now = self.inner.clock.now();
            let next = {
                let mut scheduled = self.inner.scheduled.borrow_mut();
                let due = scheduled
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.id.0 < boundary)
                    .filter_map(|(index, timer)| {
                        timer
                            .deadline
                            .filter(|deadline| *deadline <= now)
                            .map(|deadline| (index, deadline, timer.id))
                    })
                    .min_by_key(|(_, deadline, id)| (*deadline, *id))
                    .map(|(index, _, _)| index);
                due.map(|index| scheduled.remove(index))
            };
            let Some(timer) = next else {
                break;
            };
            tracing::trace!(timer = timer.id.0, "timer fired");
            (timer.callback)();
            fired += 1;
        }
        fired
    }

    pub fn pending(&self) -> usize {
        self.inner.scheduled.borrow().len()
    }
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
