// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake action and condition for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use cue_core::{Action, AsyncToken, Condition, MetHandle, NodeContext, TokenError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How a [`FakeAction`] answers each invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeReply {
    Succeed,
    Fail(String),
    Pending,
}

#[derive(Default)]
struct FakeActionState {
    issued: RefCell<Vec<AsyncToken>>,
    aborts: Cell<usize>,
}

/// Fake action for testing. Clones share the invocation log.
#[derive(Clone)]
pub struct FakeAction {
    kind: Rc<str>,
    reply: Rc<RefCell<FakeReply>>,
    state: Rc<FakeActionState>,
}

impl FakeAction {
    pub fn new(reply: FakeReply) -> Self {
        Self {
            kind: Rc::from("fake"),
            reply: Rc::new(RefCell::new(reply)),
            state: Rc::default(),
        }
    }

    pub fn pending() -> Self {
        Self::new(FakeReply::Pending)
    }

    pub fn succeeding() -> Self {
        Self::new(FakeReply::Succeed)
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(FakeReply::Fail(reason.to_string()))
    }

    /// Report a different type tag
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Rc::from(kind);
        self
    }

    pub fn set_reply(&self, reply: FakeReply) {
        *self.reply.borrow_mut() = reply;
    }

    /// Number of invocations so far
    pub fn calls(&self) -> usize {
        self.state.issued.borrow().len()
    }

    /// Token returned by the most recent invocation
    pub fn last(&self) -> Option<AsyncToken> {
        self.state.issued.borrow().last().cloned()
    }

    /// Succeed the most recent token. Returns false if there is none.
    pub fn succeed_last(&self) -> bool {
        self.last().map(|token| token.succeed()).is_some()
    }

    /// Fail the most recent token. Returns false if there is none.
    pub fn fail_last(&self, reason: &str) -> bool {
        self.last()
            .map(|token| token.fail(TokenError::failed(reason)))
            .is_some()
    }

    /// Aborts that hit a still-pending token
    pub fn aborts(&self) -> usize {
        self.state.aborts.get()
    }

    pub fn boxed(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

impl Action for FakeAction {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn act(&self) -> AsyncToken {
        let token = match &*self.reply.borrow() {
            FakeReply::Succeed => AsyncToken::succeeded(),
            FakeReply::Fail(reason) => AsyncToken::failed(TokenError::failed(reason.clone())),
            FakeReply::Pending => AsyncToken::pending(),
        };

        let resolved = Rc::new(Cell::new(false));
        let mark = Rc::clone(&resolved);
        token.ready(move |_| mark.set(true));
        let state = Rc::clone(&self.state);
        token.on_abort(move || {
            if !resolved.get() {
                state.aborts.set(state.aborts.get() + 1);
            }
        });

        self.state.issued.borrow_mut().push(token.clone());
        token
    }
}

#[derive(Default)]
struct FakeConditionState {
    watched: Cell<bool>,
    observing: Cell<bool>,
    enable_calls: Cell<usize>,
    met: RefCell<Option<MetHandle>>,
}

/// Fake condition over an externally settable value. Clones share state.
#[derive(Clone, Default)]
pub struct FakeCondition {
    state: Rc<FakeConditionState>,
}

impl FakeCondition {
    pub fn new(watched: bool) -> Self {
        let condition = Self::default();
        condition.state.watched.set(watched);
        condition
    }

    /// Change the watched value, reporting it while observed
    pub fn set(&self, value: bool) {
        self.state.watched.set(value);
        if !self.state.observing.get() {
            return;
        }
        let met = self.state.met.borrow().clone();
        if let Some(met) = met {
            met.set(value);
        }
    }

    pub fn observing(&self) -> bool {
        self.state.observing.get()
    }

    pub fn enable_calls(&self) -> usize {
        self.state.enable_calls.get()
    }

    pub fn boxed(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

impl Condition for FakeCondition {
    fn kind(&self) -> &str {
        "fake"
    }

    fn initialize(&mut self, _ctx: &NodeContext, met: MetHandle) {
        *self.state.met.borrow_mut() = Some(met);
    }

    fn on_enable_changed(&mut self, enabled: bool) {
        self.state.observing.set(enabled);
        self.state
            .enable_calls
            .set(self.state.enable_calls.get() + 1);
        if enabled && self.state.watched.get() {
            let met = self.state.met.borrow().clone();
            if let Some(met) = met {
                met.set(true);
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
