// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token combinators
//!
//! - [`all_of`]: fail-fast. Succeeds once every part succeeded, fails the
//!   moment any part fails.
//! - [`wait_all`]: succeeds once every part resolved, whatever the outcome.
//!
//! Both return an already-successful token for an empty input, keep the
//! original parts reachable through [`AsyncToken::parts`], and abort every
//! part when the composite is aborted. Parts hold only a weak reference to
//! the composite, so the composite lives as long as its owner keeps it.

use crate::token::AsyncToken;
use std::cell::Cell;
use std::rc::Rc;

/// Combine `tokens` with fail-fast semantics
pub fn all_of(tokens: Vec<AsyncToken>) -> AsyncToken {
    let composite = AsyncToken::composite(tokens.clone());
    if tokens.is_empty() {
        composite.succeed();
        return composite;
    }

    let remaining = Rc::new(Cell::new(tokens.len()));
    for token in &tokens {
        let weak = composite.downgrade();
        let remaining = Rc::clone(&remaining);
        token.ready(move |part| {
            let Some(composite) = weak.upgrade() else {
                return;
            };
            match part.error() {
                Some(error) => composite.fail(error),
                None => {
                    remaining.set(remaining.get() - 1);
                    if remaining.get() == 0 {
                        composite.succeed();
                    }
                }
            }
        });
    }
    composite
}

/// Combine `tokens`, waiting for every one to resolve and ignoring failures
pub fn wait_all(tokens: Vec<AsyncToken>) -> AsyncToken {
    let composite = AsyncToken::composite(tokens.clone());
    if tokens.is_empty() {
        composite.succeed();
        return composite;
    }

    let remaining = Rc::new(Cell::new(tokens.len()));
    for token in &tokens {
        let weak = composite.downgrade();
        let remaining = Rc::clone(&remaining);
        token.ready(move |_| {
            remaining.set(remaining.get() - 1);
            if remaining.get() == 0 {
                if let Some(composite) = weak.upgrade() {
                    composite.succeed();
                }
            }
        });
    }
    composite
}

#[cfg(test)]
#[path = "combinator_tests.rs"]
mod tests;
