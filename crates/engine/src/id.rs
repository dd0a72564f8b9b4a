// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run id generation

use std::cell::Cell;
use std::rc::Rc;

/// Generates unique run identifiers
pub trait IdGen {
    fn next(&self) -> String;
}

/// UUID-based generator for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Predictable `prefix-n` ids for tests. Clones share the counter.
#[derive(Debug, Clone)]
pub struct SequentialIdGen {
    prefix: Rc<str>,
    counter: Rc<Cell<u64>>,
}

impl SequentialIdGen {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: Rc::from(prefix),
            counter: Rc::new(Cell::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("run")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.get();
        self.counter.set(n + 1);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
