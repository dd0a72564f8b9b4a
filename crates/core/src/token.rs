// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AsyncToken: a handle for one pending operation
//!
//! A token resolves to success or failure exactly once. Callbacks registered
//! with [`AsyncToken::ready`] run synchronously on resolution, in
//! registration order. [`AsyncToken::abort`] is a separate cooperative
//! cancellation signal: it drops every queued ready-callback and notifies
//! abort subscribers, but leaves the token unresolved.

use crate::error::TokenError;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type ReadyCallback = Box<dyn FnOnce(&AsyncToken)>;
type AbortCallback = Box<dyn FnOnce()>;

/// Resolution state of a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Pending,
    Succeeded,
    Failed(TokenError),
}

struct TokenInner {
    state: TokenState,
    aborted: bool,
    ready: Vec<ReadyCallback>,
    abort: Vec<AbortCallback>,
    parts: Vec<AsyncToken>,
}

/// Future-like handle for a pending operation. Clones share state.
#[derive(Clone)]
pub struct AsyncToken {
    inner: Rc<RefCell<TokenInner>>,
}

/// Non-owning reference to a token, used by combinators
#[derive(Clone)]
pub(crate) struct WeakToken {
    inner: Weak<RefCell<TokenInner>>,
}

impl WeakToken {
    pub(crate) fn upgrade(&self) -> Option<AsyncToken> {
        self.inner.upgrade().map(|inner| AsyncToken { inner })
    }
}

impl AsyncToken {
    /// A token that has not resolved yet
    pub fn pending() -> Self {
        Self::with_state(TokenState::Pending, Vec::new())
    }

    /// An already-successful token
    pub fn succeeded() -> Self {
        Self::with_state(TokenState::Succeeded, Vec::new())
    }

    /// An already-failed token
    pub fn failed(error: TokenError) -> Self {
        Self::with_state(TokenState::Failed(error), Vec::new())
    }

    /// Pending composite over `parts`; aborting it aborts every part
    pub(crate) fn composite(parts: Vec<AsyncToken>) -> Self {
        let token = Self::with_state(TokenState::Pending, parts.clone());
        token.on_abort(move || {
            for part in &parts {
                part.abort();
            }
        });
        token
    }

    fn with_state(state: TokenState, parts: Vec<AsyncToken>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TokenInner {
                state,
                aborted: false,
                ready: Vec::new(),
                abort: Vec::new(),
                parts,
            })),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakToken {
        WeakToken {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Resolve successfully. No-op if already resolved.
    pub fn succeed(&self) {
        self.resolve(TokenState::Succeeded);
    }

    /// Resolve as a failure. No-op if already resolved.
    pub fn fail(&self, error: TokenError) {
        self.resolve(TokenState::Failed(error));
    }

    fn resolve(&self, state: TokenState) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != TokenState::Pending {
                return;
            }
            inner.state = state;
            if inner.aborted {
                tracing::debug!(state = ?inner.state, "token resolved after abort, dropping result");
            }
            std::mem::take(&mut inner.ready)
        };
        for callback in callbacks {
            callback(self);
        }
    }

    /// Run `callback` once the token resolves.
    ///
    /// Fires immediately when the token is already resolved. On a pending
    /// token that has been aborted the callback is dropped, since it could
    /// never fire.
    pub fn ready(&self, callback: impl FnOnce(&AsyncToken) + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == TokenState::Pending {
                if !inner.aborted {
                    inner.ready.push(Box::new(callback));
                }
                return;
            }
        }
        callback(self);
    }

    /// Cooperative cancellation. Idempotent; does not resolve the token.
    pub fn abort(&self) {
        let (dropped, subscribers) = {
            let mut inner = self.inner.borrow_mut();
            if inner.aborted {
                return;
            }
            inner.aborted = true;
            (
                std::mem::take(&mut inner.ready),
                std::mem::take(&mut inner.abort),
            )
        };
        drop(dropped);
        for subscriber in subscribers {
            subscriber();
        }
    }

    /// Subscribe to abort. Fires immediately if the token was already aborted.
    pub fn on_abort(&self, callback: impl FnOnce() + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.aborted {
                inner.abort.push(Box::new(callback));
                return;
            }
        }
        callback();
    }

    pub fn is_ready(&self) -> bool {
        self.inner.borrow().state != TokenState::Pending
    }

    pub fn success(&self) -> bool {
        self.inner.borrow().state == TokenState::Succeeded
    }

    pub fn error(&self) -> Option<TokenError> {
        match &self.inner.borrow().state {
            TokenState::Failed(error) => Some(error.clone()),
            _ => None,
        }
    }

    pub fn state(&self) -> TokenState {
        self.inner.borrow().state.clone()
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.borrow().aborted
    }

    /// Sub-tokens of a composite, in the order they were combined
    pub fn parts(&self) -> Vec<AsyncToken> {
        self.inner.borrow().parts.clone()
    }

    /// True when both handles refer to the same token
    pub fn ptr_eq(&self, other: &AsyncToken) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for AsyncToken {
    fn default() -> Self {
        Self::pending()
    }
}

impl fmt::Debug for AsyncToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("AsyncToken")
            .field("state", &inner.state)
            .field("aborted", &inner.aborted)
            .field("queued", &inner.ready.len())
            .field("parts", &inner.parts.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
