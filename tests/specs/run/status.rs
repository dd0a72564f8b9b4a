//! Run status specs
//!
//! Verify the `status` command reports each sequence's progress.

use crate::prelude::*;

#[test]
fn status_lists_every_loaded_sequence() {
    let temp = Project::empty();
    temp.file("runbooks/a.toml", MINIMAL_RUNBOOK);
    temp.file("runbooks/b.toml", GATED_RUNBOOK);

    temp.cue()
        .args(&["run", "runbooks", "--sequence", "door"])
        .stdin("status\n")
        .passes()
        .stdout_has("door: active 0/3 complete")
        .stdout_has("hello: inactive 0/1 complete");
}

#[test]
fn status_counts_completed_nodes() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("flag door_open=true\nstatus\n")
        .passes()
        .stdout_has("door: active 1/3 complete");
}

#[test]
fn finished_sequence_retires() {
    let temp = Project::with_runbook(MINIMAL_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("status\nactivate hello\n")
        .passes()
        .stdout_has("[hello#0] hello there")
        .stdout_has("hello: retired")
        .stderr_has("host event rejected");
}

#[test]
fn repeatable_sequence_runs_again_on_activate() {
    let temp = Project::with_runbook(
        r#"
[sequence.loop]
repeatable = true

[[sequence.loop.node]]
final = true
actions = [{ type = "emit", message = "again" }]
"#,
    );
    let output = temp
        .cue()
        .args(&["run", &temp.runbook()])
        .stdin("activate loop\nactivate loop\n")
        .passes()
        .stdout_lacks("retired");
    assert_eq!(output.stdout.matches("[loop#0] again").count(), 3);
}

#[test]
fn losing_the_gate_resets_progress() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("flag door_open=true\nflag door_open=false\nstatus\n")
        .passes()
        .stdout_has("door: active 0/3 complete");
}

#[test]
fn json_status_is_an_array() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    let output = temp
        .cue()
        .args(&["run", &temp.runbook(), "--json", "--flag", "door_open=on"])
        .stdin("status\n")
        .passes();

    let statuses: Vec<serde_json::Value> = output
        .json_lines()
        .into_iter()
        .filter(serde_json::Value::is_array)
        .collect();
    assert_eq!(statuses.len(), 1);
    let door = &statuses[0][0];
    assert_eq!(door["name"], "door");
    assert_eq!(door["active"], true);
    assert_eq!(door["retired"], false);
    assert_eq!(door["run"]["finished"], false);
    assert_eq!(door["snapshot"]["eligible"], true);
    assert_eq!(door["snapshot"]["nodes"][1]["active"], true);
    assert!(door["run"]["run_id"].is_string());
}
