// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Director: owns the live sequences and routes host events to them

use crate::build::build_sequence;
use crate::error::EngineError;
use crate::id::{IdGen, UuidIdGen};
use cue_adapters::{Factory, HostServices};
use cue_core::{Sequence, SequenceEvent, SequenceSnapshot};
use cue_runbook::Runbook;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Something the host tells the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Host time advanced; fire due timers
    Tick,
    SetFlag { flag: String, value: bool },
    Signal { name: String },
    Activate { sequence: String },
    Deactivate { sequence: String },
}

/// Progress of the current run of one sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    pub run_id: Option<String>,
    /// Id of the most recently completed checkpoint node
    pub last_checkpoint: Option<u32>,
    /// A final node completed
    pub finished: bool,
    /// Times a final node completed during this run
    pub completions: u32,
    /// Failures that reset the sequence during this run
    pub failures: u32,
}

/// Status line for one loaded sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceStatus {
    pub name: String,
    pub active: bool,
    /// Finished and not repeatable; refuses activation
    pub retired: bool,
    pub run: RunStatus,
    pub snapshot: SequenceSnapshot,
}

struct Entry {
    sequence: Sequence,
    repeatable: bool,
    active: bool,
    retired: bool,
    status: Rc<RefCell<RunStatus>>,
}

/// Registry of live sequences keyed by name
pub struct Director {
    host: HostServices,
    factory: Factory,
    ids: Box<dyn IdGen>,
    entries: BTreeMap<String, Entry>,
    // Sequences whose final node completed since the last settle
    finished: Rc<RefCell<Vec<String>>>,
}

impl Director {
    pub fn new(host: HostServices, factory: Factory) -> Self {
        Self::with_ids(host, factory, UuidIdGen)
    }

    pub fn with_ids(host: HostServices, factory: Factory, ids: impl IdGen + 'static) -> Self {
        Self {
            host,
            factory,
            ids: Box::new(ids),
            entries: BTreeMap::new(),
            finished: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn host(&self) -> &HostServices {
        &self.host
    }

    pub fn sequence(&self, name: &str) -> Option<&Sequence> {
        self.entries.get(name).map(|entry| &entry.sequence)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Build and register every sequence in the runbook.
    ///
    /// Either all of them load or none do.
    pub fn load(&mut self, runbook: &Runbook) -> Result<(), EngineError> {
        if let Some(name) = runbook.names().find(|name| self.entries.contains_key(*name)) {
            return Err(EngineError::AlreadyLoaded(name.to_string()));
        }

        let mut built = Vec::with_capacity(runbook.sequences.len());
        for def in runbook.sequences.values() {
            built.push((def, build_sequence(def, &self.factory, &self.host)?));
        }

        for (def, sequence) in built {
            let status = Rc::new(RefCell::new(RunStatus::default()));
            self.observe(&sequence, Rc::clone(&status));
            self.entries.insert(
                def.name.clone(),
                Entry {
                    sequence,
                    repeatable: def.repeatable,
                    active: false,
                    retired: false,
                    status,
                },
            );
        }
        tracing::info!(sequences = self.entries.len(), "runbook loaded");
        Ok(())
    }

    fn observe(&self, sequence: &Sequence, status: Rc<RefCell<RunStatus>>) {
        let finished = Rc::clone(&self.finished);
        let name = sequence.name().to_string();
        sequence.on_event(move |event| match event {
            SequenceEvent::NodeCompleted {
                node,
                final_node,
                checkpoint,
            } => {
                let mut status = status.borrow_mut();
                if *checkpoint {
                    status.last_checkpoint = Some(node.0);
                }
                if *final_node {
                    status.finished = true;
                    status.completions += 1;
                    let mut queue = finished.borrow_mut();
                    if !queue.contains(&name) {
                        queue.push(name.clone());
                    }
                }
            }
            SequenceEvent::Failed { .. } => status.borrow_mut().failures += 1,
            _ => {}
        });
    }

    /// Start a new run: arm the sequence and enable it if eligible
    pub fn activate(&mut self, name: &str) -> Result<(), EngineError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| EngineError::SequenceNotFound(name.to_string()))?;
        if entry.retired {
            return Err(EngineError::NotRepeatable(name.to_string()));
        }
        if entry.active && !entry.status.borrow().finished {
            tracing::debug!(sequence = name, "already active");
            return Ok(());
        }

        let run_id = self.ids.next();
        tracing::info!(sequence = name, run_id = %run_id, "activating");
        *entry.status.borrow_mut() = RunStatus {
            run_id: Some(run_id),
            ..RunStatus::default()
        };
        entry.active = true;
        let sequence = entry.sequence.clone();
        sequence.reset_sequence();
        sequence.initialize();
        self.settle();
        Ok(())
    }

    /// Stop observing and reset. A later `activate` starts a fresh run.
    pub fn deactivate(&mut self, name: &str) -> Result<(), EngineError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| EngineError::SequenceNotFound(name.to_string()))?;
        if !entry.active {
            return Ok(());
        }
        tracing::info!(sequence = name, "deactivating");
        entry.active = false;
        let sequence = entry.sequence.clone();
        sequence.disarm();
        self.settle();
        Ok(())
    }

    /// Apply one host event
    pub fn handle(&mut self, event: HostEvent) -> Result<(), EngineError> {
        tracing::trace!(?event, "host event");
        match event {
            HostEvent::Tick => {
                self.host.tick();
            }
            HostEvent::SetFlag { flag, value } => self.host.flags.set(&flag, value),
            HostEvent::Signal { name } => self.host.signals.raise(&name),
            HostEvent::Activate { sequence } => return self.activate(&sequence),
            HostEvent::Deactivate { sequence } => return self.deactivate(&sequence),
        }
        self.settle();
        Ok(())
    }

    // Finished repeatable sequences are reset but stay armed, so the next
    // rise of their condition (or an activation) runs them again. The rest
    // retire.
    fn settle(&mut self) {
        loop {
            let finished: Vec<String> = self.finished.borrow_mut().drain(..).collect();
            if finished.is_empty() {
                break;
            }
            for name in finished {
                let Some(entry) = self.entries.get_mut(&name) else {
                    continue;
                };
                let sequence = entry.sequence.clone();
                if entry.repeatable {
                    tracing::info!(sequence = %name, "sequence finished, ready to repeat");
                    sequence.reset_sequence();
                } else {
                    tracing::info!(sequence = %name, "sequence finished, retiring");
                    entry.active = false;
                    entry.retired = true;
                    sequence.disarm();
                }
            }
        }
    }

    pub fn status(&self) -> Vec<SequenceStatus> {
        self.entries
            .iter()
            .map(|(name, entry)| SequenceStatus {
                name: name.clone(),
                active: entry.active,
                retired: entry.retired,
                run: entry.status.borrow().clone(),
                snapshot: entry.sequence.snapshot(),
            })
            .collect()
    }
}

impl std::fmt::Debug for Director {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("sequences", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "director_tests.rs"]
mod tests;
