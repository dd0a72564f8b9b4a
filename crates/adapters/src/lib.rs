// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Host services and the built-in conditions and actions

pub mod actions;
pub mod clock;
pub mod conditions;
pub mod factory;
pub mod host;
pub mod traced;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use actions::{
    AwaitSignalAction, EmitAction, FailAction, LogAction, SetFlagAction, WaitAction,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use conditions::{AlwaysCondition, FlagCondition, SignalCondition, TimerCondition};
pub use factory::{params, Factory, FactoryError};
pub use host::{FlagChange, FlagStore, HostMessage, HostServices, Outbox, SignalHub, TimerId, Timers};
pub use traced::TracedAction;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeAction, FakeCondition, FakeReply};
