// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host services shared by the built-in conditions and actions
//!
//! Everything here is single-threaded and handle-based: clones refer to the
//! same underlying state, so the factory can give every adapter its own copy.

mod flags;
mod outbox;
mod signals;
mod timers;

pub use flags::{FlagChange, FlagStore};
pub use outbox::{HostMessage, Outbox};
pub use signals::SignalHub;
pub use timers::{TimerId, Timers};

use crate::clock::{Clock, SystemClock};
use std::rc::Rc;

/// Bundle of host capabilities handed to adapters
#[derive(Clone)]
pub struct HostServices {
    pub clock: Rc<dyn Clock>,
    pub timers: Timers,
    pub flags: FlagStore,
    pub signals: SignalHub,
    pub outbox: Outbox,
}

impl HostServices {
    pub fn new(clock: Rc<dyn Clock>, outbox: Outbox) -> Self {
        Self {
            timers: Timers::new(Rc::clone(&clock)),
            clock,
            flags: FlagStore::new(),
            signals: SignalHub::new(),
            outbox,
        }
    }

    /// Services on the system clock
    pub fn system(outbox: Outbox) -> Self {
        Self::new(Rc::new(SystemClock), outbox)
    }

    /// Advance host time: fire every due timer. Returns how many fired.
    pub fn tick(&self) -> usize {
        self.timers.fire_due()
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("timers", &self.timers)
            .field("flags", &self.flags)
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}
