// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type tag registry that turns runbook items into live adapters

use crate::actions::{
    AwaitSignalAction, EmitAction, FailAction, LogAction, SetFlagAction, WaitAction,
};
use crate::conditions::{AlwaysCondition, FlagCondition, SignalCondition, TimerCondition};
use crate::host::HostServices;
use crate::traced::TracedAction;
use cue_runbook::ItemDef;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Errors building an adapter from its definition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryError {
    #[error("unknown action type: {0}")]
    UnknownAction(String),
    #[error("unknown condition type: {0}")]
    UnknownCondition(String),
    #[error("invalid parameters for {kind}: {reason}")]
    InvalidParams { kind: String, reason: String },
}

type ActionCtor =
    Box<dyn Fn(&ItemDef, &HostServices) -> Result<Box<dyn cue_core::Action>, FactoryError>>;
type ConditionCtor =
    Box<dyn Fn(&ItemDef, &HostServices) -> Result<Box<dyn cue_core::Condition>, FactoryError>>;

/// Constructors keyed by type tag
pub struct Factory {
    actions: BTreeMap<String, ActionCtor>,
    conditions: BTreeMap<String, ConditionCtor>,
}

impl Factory {
    /// A factory that knows no tags
    pub fn empty() -> Self {
        Self {
            actions: BTreeMap::new(),
            conditions: BTreeMap::new(),
        }
    }

    /// A factory pre-populated with the built-in tags
    pub fn with_builtins() -> Self {
        let mut factory = Self::empty();

        factory.register_condition("flag", |item, host| {
            let p: FlagParams = params(item)?;
            Ok(Box::new(FlagCondition::new(host.flags.clone(), p.flag, p.value)))
        });
        factory.register_condition("timer", |item, host| {
            let p: TimerParams = params(item)?;
            Ok(Box::new(TimerCondition::new(host.timers.clone(), p.after)))
        });
        factory.register_condition("signal", |item, host| {
            let p: SignalParams = params(item)?;
            Ok(Box::new(SignalCondition::new(host.signals.clone(), p.signal)))
        });
        factory.register_condition("always", |item, _| {
            let _: NoParams = params(item)?;
            Ok(Box::new(AlwaysCondition::default()))
        });

        factory.register_action("wait", |item, host| {
            let p: WaitParams = params(item)?;
            Ok(Box::new(WaitAction::new(host.timers.clone(), p.duration)))
        });
        factory.register_action("set_flag", |item, host| {
            let p: FlagParams = params(item)?;
            Ok(Box::new(SetFlagAction::new(host.flags.clone(), p.flag, p.value)))
        });
        factory.register_action("emit", |item, host| {
            let p: MessageParams = params(item)?;
            Ok(Box::new(EmitAction::new(host.outbox.clone(), p.message)))
        });
        factory.register_action("await_signal", |item, host| {
            let p: SignalParams = params(item)?;
            Ok(Box::new(AwaitSignalAction::new(host.signals.clone(), p.signal)))
        });
        factory.register_action("log", |item, _| {
            let p: MessageParams = params(item)?;
            Ok(Box::new(LogAction::new(p.message)))
        });
        factory.register_action("fail", |item, _| {
            let p: FailParams = params(item)?;
            Ok(Box::new(FailAction::new(p.reason)))
        });

        factory
    }

    /// Register (or replace) an action constructor
    pub fn register_action<F>(&mut self, kind: impl Into<String>, ctor: F)
    where
        F: Fn(&ItemDef, &HostServices) -> Result<Box<dyn cue_core::Action>, FactoryError>
            + 'static,
    {
        self.actions.insert(kind.into(), Box::new(ctor));
    }

    /// Register (or replace) a condition constructor
    pub fn register_condition<F>(&mut self, kind: impl Into<String>, ctor: F)
    where
        F: Fn(&ItemDef, &HostServices) -> Result<Box<dyn cue_core::Condition>, FactoryError>
            + 'static,
    {
        self.conditions.insert(kind.into(), Box::new(ctor));
    }

    /// Build an action, wrapped in a [`TracedAction`]
    pub fn build_action(
        &self,
        item: &ItemDef,
        host: &HostServices,
    ) -> Result<Box<dyn cue_core::Action>, FactoryError> {
        let ctor = self
            .actions
            .get(&item.kind)
            .ok_or_else(|| FactoryError::UnknownAction(item.kind.clone()))?;
        Ok(Box::new(TracedAction::new(ctor(item, host)?)))
    }

    pub fn build_condition(
        &self,
        item: &ItemDef,
        host: &HostServices,
    ) -> Result<Box<dyn cue_core::Condition>, FactoryError> {
        let ctor = self
            .conditions
            .get(&item.kind)
            .ok_or_else(|| FactoryError::UnknownCondition(item.kind.clone()))?;
        ctor(item, host)
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .field("conditions", &self.conditions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Decode an item's parameters into `T`
pub fn params<T: DeserializeOwned>(item: &ItemDef) -> Result<T, FactoryError> {
    toml::Value::Table(item.params.clone())
        .try_into()
        .map_err(|e: toml::de::Error| FactoryError::InvalidParams {
            kind: item.kind.clone(),
            reason: e.message().to_string(),
        })
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoParams {}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FlagParams {
    flag: String,
    #[serde(default = "default_true")]
    value: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TimerParams {
    #[serde(with = "humantime_serde")]
    after: Duration,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WaitParams {
    #[serde(with = "humantime_serde")]
    duration: Duration,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SignalParams {
    signal: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MessageParams {
    message: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FailParams {
    reason: String,
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
