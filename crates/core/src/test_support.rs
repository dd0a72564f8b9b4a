// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hand-driven actions and conditions for unit tests

use crate::action::Action;
use crate::condition::{Condition, MetHandle};
use crate::context::NodeContext;
use crate::error::TokenError;
use crate::token::AsyncToken;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How a [`ManualAction`] answers each invocation
#[derive(Debug, Clone)]
pub enum Reply {
    Succeed,
    Fail(String),
    Pending,
}

#[derive(Default)]
struct ActionLog {
    issued: RefCell<Vec<AsyncToken>>,
}

/// Action whose tokens the test resolves. Clones share the log.
#[derive(Clone)]
pub struct ManualAction {
    reply: Rc<RefCell<Reply>>,
    log: Rc<ActionLog>,
}

impl ManualAction {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Rc::new(RefCell::new(reply)),
            log: Rc::new(ActionLog::default()),
        }
    }

    pub fn pending() -> Self {
        Self::new(Reply::Pending)
    }

    pub fn succeeding() -> Self {
        Self::new(Reply::Succeed)
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(Reply::Fail(reason.to_string()))
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.borrow_mut() = reply;
    }

    pub fn calls(&self) -> usize {
        self.log.issued.borrow().len()
    }

    pub fn last(&self) -> AsyncToken {
        self.log
            .issued
            .borrow()
            .last()
            .cloned()
            .expect("action was never invoked")
    }

    pub fn boxed(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

impl Action for ManualAction {
    fn kind(&self) -> &str {
        "manual"
    }

    fn act(&self) -> AsyncToken {
        let token = match &*self.reply.borrow() {
            Reply::Succeed => AsyncToken::succeeded(),
            Reply::Fail(reason) => AsyncToken::failed(TokenError::failed(reason.clone())),
            Reply::Pending => AsyncToken::pending(),
        };
        self.log.issued.borrow_mut().push(token.clone());
        token
    }
}

/// Condition over a test-controlled boolean. Clones share state.
#[derive(Clone, Default)]
pub struct ManualCondition {
    watched: Rc<Cell<bool>>,
    enabled: Rc<Cell<bool>>,
    enable_calls: Rc<Cell<usize>>,
    met: Rc<RefCell<Option<MetHandle>>>,
}

impl ManualCondition {
    pub fn new(watched: bool) -> Self {
        let condition = Self::default();
        condition.watched.set(watched);
        condition
    }

    /// Change the watched state, reporting it when enabled
    pub fn set_watched(&self, value: bool) {
        self.watched.set(value);
        if self.enabled.get() {
            if let Some(met) = &*self.met.borrow() {
                met.set(value);
            }
        }
    }

    pub fn enable_calls(&self) -> usize {
        self.enable_calls.get()
    }

    pub fn observing(&self) -> bool {
        self.enabled.get()
    }

    pub fn boxed(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

impl Condition for ManualCondition {
    fn kind(&self) -> &str {
        "manual"
    }

    fn initialize(&mut self, _ctx: &NodeContext, met: MetHandle) {
        *self.met.borrow_mut() = Some(met);
    }

    fn on_enable_changed(&mut self, enabled: bool) {
        self.enabled.set(enabled);
        self.enable_calls.set(self.enable_calls.get() + 1);
        if enabled && self.watched.get() {
            if let Some(met) = &*self.met.borrow() {
                met.set(true);
            }
        }
    }
}
