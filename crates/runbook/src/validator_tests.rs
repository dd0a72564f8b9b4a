// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parse_runbook;

#[test]
fn valid_runbook_passes() {
    let runbook = parse_runbook(
        r#"
[sequence.ok]
condition = { type = "always" }

[[sequence.ok.node]]
actions = [{ type = "log", message = "hi" }]

[[sequence.ok.node]]
sequential = true
final = true
"#,
    )
    .unwrap();
    assert_eq!(validate_runbook(&runbook), Ok(()));
}

#[test]
fn sequence_without_nodes_is_rejected() {
    let runbook = parse_runbook("[sequence.empty]\n").unwrap();
    let errors = validate_runbook(&runbook).unwrap_err();
    assert_eq!(
        errors.errors,
        vec![ValidationError::NoNodes {
            sequence: "empty".to_string()
        }]
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let runbook = parse_runbook(
        r#"
[[sequence.dup.node]]
id = 3

[[sequence.dup.node]]
id = 3
"#,
    )
    .unwrap();
    let errors = validate_runbook(&runbook).unwrap_err();
    assert_eq!(
        errors.errors,
        vec![ValidationError::DuplicateNodeId {
            sequence: "dup".to_string(),
            id: 3
        }]
    );
}

#[test]
fn blank_type_tags_are_reported_with_location() {
    let runbook = parse_runbook(
        r#"
[sequence.blank]
condition = { type = "" }

[[sequence.blank.node]]
id = 4
conditions = [{ type = "always" }, { type = " " }]
actions = [{ type = "" }]
"#,
    )
    .unwrap();
    let errors = validate_runbook(&runbook).unwrap_err();
    let locations: Vec<_> = errors
        .errors
        .iter()
        .map(|e| match e {
            ValidationError::EmptyTypeTag { location, .. } => location.as_str(),
            other => panic!("unexpected error: {other}"),
        })
        .collect();
    assert_eq!(
        locations,
        vec!["condition", "node 4 conditions[1]", "node 4 actions[0]"]
    );
}

#[test]
fn errors_are_collected_across_sequences() {
    let runbook = parse_runbook(
        r#"
[sequence.a]

[sequence.b]
"#,
    )
    .unwrap();
    let errors = validate_runbook(&runbook).unwrap_err();
    assert_eq!(errors.errors.len(), 2);

    let message = errors.to_string();
    assert!(message.starts_with("Runbook validation failed with 2 error(s):"));
    assert!(message.contains("  1: Sequence 'a' has no nodes"));
    assert!(message.contains("  2: Sequence 'b' has no nodes"));
}
