// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cue_adapters::{FactoryError, FakeClock, Outbox};
use cue_core::NodeId;
use cue_runbook::parse_runbook;
use std::rc::Rc;
use std::time::Duration;

fn host() -> (FakeClock, HostServices) {
    let clock = FakeClock::new();
    let host = HostServices::new(Rc::new(clock.clone()), Outbox::detached());
    (clock, host)
}

fn def(toml: &str) -> SequenceDef {
    let runbook = parse_runbook(toml).unwrap();
    runbook.sequences.into_values().next().unwrap()
}

#[test]
fn builds_nodes_in_order_with_flags() {
    let def = def(r#"
[sequence.door]
condition = { type = "flag", flag = "power" }

[[sequence.door.node]]
name = "unlock"
actions = [{ type = "set_flag", flag = "unlocked" }]

[[sequence.door.node]]
name = "open"
sequential = true
final = true
conditions = [{ type = "timer", after = "1s" }]
actions = [{ type = "set_flag", flag = "open" }]
"#);
    let (_clock, host) = host();

    let sequence = build_sequence(&def, &Factory::default(), &host).unwrap();
    assert_eq!(sequence.name(), "door");
    assert_eq!(sequence.condition().map(|g| g.kind()), Some("flag"));
    let nodes = sequence.nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id(), NodeId(0));
    assert_eq!(nodes[1].name(), "open");
    assert!(nodes[1].flags().sequential);
    assert!(nodes[1].flags().final_node);
}

#[test]
fn built_sequence_runs_against_host_services() {
    let def = def(r#"
[sequence.door]
condition = { type = "flag", flag = "power" }

[[sequence.door.node]]
actions = [{ type = "set_flag", flag = "unlocked" }]

[[sequence.door.node]]
sequential = true
conditions = [{ type = "timer", after = "1s" }]
actions = [{ type = "set_flag", flag = "open" }]
"#);
    let (clock, host) = host();
    let sequence = build_sequence(&def, &Factory::default(), &host).unwrap();
    sequence.initialize();
    assert!(!host.flags.get("unlocked"));

    host.flags.set("power", true);
    assert!(host.flags.get("unlocked"));
    assert!(!host.flags.get("open"));

    clock.advance(Duration::from_secs(1));
    host.tick();
    assert!(host.flags.get("open"));
}

#[test]
fn bad_gating_condition_names_the_sequence() {
    let def = def(r#"
[sequence.broken]
condition = { type = "moon_phase" }

[[sequence.broken.node]]
"#);
    let (_clock, host) = host();
    let err = build_sequence(&def, &Factory::default(), &host).unwrap_err();
    assert_eq!(
        err,
        EngineError::Condition {
            sequence: "broken".to_string(),
            source: FactoryError::UnknownCondition("moon_phase".to_string()),
        }
    );
}

#[test]
fn bad_node_item_names_the_node() {
    let def = def(r#"
[[sequence.broken.node]]
id = 4
actions = [{ type = "wait" }]
"#);
    let (_clock, host) = host();
    let err = build_sequence(&def, &Factory::default(), &host).unwrap_err();
    assert!(
        matches!(err, EngineError::Node { node: 4, source: FactoryError::InvalidParams { .. }, .. }),
        "{err}"
    );
    assert!(err.to_string().starts_with("sequence broken, node 4:"));
}
