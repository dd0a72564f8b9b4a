//! Runbook check specs
//!
//! Verify `cue check` parses, validates and builds every sequence.

use crate::prelude::*;

#[test]
fn check_reports_each_sequence() {
    let temp = Project::with_runbook(MINIMAL_RUNBOOK);
    temp.cue()
        .args(&["check", &temp.runbook()])
        .passes()
        .stdout_eq("hello: 1 node(s)\nok: 1 sequence(s)\n");
}

#[test]
fn check_names_the_gating_condition() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["check", &temp.runbook()])
        .passes()
        .stdout_eq("door: 3 node(s), gated by flag\nok: 1 sequence(s)\n");
}

#[test]
fn check_merges_a_directory() {
    let temp = Project::empty();
    temp.file("runbooks/a.toml", MINIMAL_RUNBOOK);
    temp.file("runbooks/b.toml", GATED_RUNBOOK);
    temp.file("runbooks/notes.txt", "not a runbook");

    temp.cue()
        .args(&["check", "runbooks"])
        .passes()
        .stdout_eq("door: 3 node(s), gated by flag\nhello: 1 node(s)\nok: 2 sequence(s)\n");
}

#[test]
fn check_rejects_duplicate_sequences_across_files() {
    let temp = Project::empty();
    temp.file("runbooks/a.toml", MINIMAL_RUNBOOK);
    temp.file("runbooks/b.toml", MINIMAL_RUNBOOK);

    temp.cue()
        .args(&["check", "runbooks"])
        .fails()
        .stderr_has("failed to load runbook");
}

#[test]
fn check_rejects_invalid_toml() {
    let temp = Project::with_runbook("[sequence.broken\n");
    temp.cue()
        .args(&["check", &temp.runbook()])
        .fails()
        .stderr_has("failed to load runbook");
}

#[test]
fn check_rejects_sequence_without_nodes() {
    let temp = Project::with_runbook("[sequence.empty]\n");
    temp.cue()
        .args(&["check", &temp.runbook()])
        .fails()
        .stderr_has("has no nodes");
}

#[test]
fn check_rejects_unknown_action_type() {
    let temp = Project::with_runbook(
        r#"
[sequence.odd]

[[sequence.odd.node]]
actions = [{ type = "teleport" }]
"#,
    );
    temp.cue()
        .args(&["check", &temp.runbook()])
        .fails()
        .stderr_has("sequence odd does not build");
}

#[test]
fn check_rejects_bad_action_params() {
    let temp = Project::with_runbook(
        r#"
[sequence.slow]

[[sequence.slow.node]]
actions = [{ type = "wait", duration = "soon" }]
"#,
    );
    temp.cue()
        .args(&["check", &temp.runbook()])
        .fails()
        .stderr_has("sequence slow does not build");
}

#[test]
fn check_missing_path_fails() {
    let temp = Project::empty();
    temp.cue()
        .args(&["check", "nowhere.toml"])
        .fails()
        .stderr_has("nowhere.toml");
}
