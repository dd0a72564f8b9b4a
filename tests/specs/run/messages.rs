//! Run message specs
//!
//! Verify `cue run` drives sequences from stdin and prints what they emit.

use crate::prelude::*;
use std::time::Duration;

#[test]
fn run_without_input_plays_ungated_sequences() {
    let temp = Project::with_runbook(MINIMAL_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("")
        .passes()
        .stdout_eq("[hello#0] hello there\n");
}

#[test]
fn flag_and_signal_commands_advance_a_gated_sequence() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("flag door_open=true\nsignal bell\n")
        .passes()
        .stdout_eq("[door#0] door opened\n[door#2] bell rang\n");
}

#[test]
fn gated_sequence_stays_quiet_without_its_flag() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("signal bell\n")
        .passes()
        .stdout_eq("");
}

#[test]
fn initial_flags_apply_before_activation() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook(), "--flag", "door_open=true"])
        .stdin("")
        .passes()
        .stdout_eq("[door#0] door opened\n");
}

#[test]
fn only_named_sequences_are_activated() {
    let temp = Project::empty();
    temp.file("runbooks/a.toml", MINIMAL_RUNBOOK);
    temp.file("runbooks/b.toml", GATED_RUNBOOK);

    temp.cue()
        .args(&["run", "runbooks", "--sequence", "door"])
        .stdin("flag door_open=true\n")
        .passes()
        .stdout_eq("[door#0] door opened\n");
}

#[test]
fn activate_command_starts_a_sequence() {
    let temp = Project::empty();
    temp.file("runbooks/a.toml", MINIMAL_RUNBOOK);
    temp.file("runbooks/b.toml", GATED_RUNBOOK);

    temp.cue()
        .args(&["run", "runbooks", "--sequence", "door"])
        .stdin("activate hello\n")
        .passes()
        .stdout_eq("[hello#0] hello there\n");
}

#[test]
fn waits_resolve_on_host_ticks() {
    let temp = Project::with_runbook(
        r#"
[sequence.timed]

[[sequence.timed.node]]
actions = [{ type = "wait", duration = "20ms" }]

[[sequence.timed.node]]
sequential = true
actions = [{ type = "emit", message = "waited" }]
"#,
    );
    temp.cue()
        .args(&["run", &temp.runbook(), "--tick-ms", "5"])
        .hold_stdin(Duration::from_millis(400))
        .stdout_eq("[timed#1] waited\n");
}

#[test]
fn quit_stops_reading_input() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("quit\nflag door_open=true\n")
        .passes()
        .stdout_eq("");
}

#[test]
fn json_messages_are_tagged() {
    let temp = Project::with_runbook(MINIMAL_RUNBOOK);
    let output = temp
        .cue()
        .args(&["run", &temp.runbook(), "--json"])
        .stdin("")
        .passes();

    let lines = output.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], "emit");
    assert_eq!(lines[0]["sequence"], "hello");
    assert_eq!(lines[0]["node"], 0);
    assert_eq!(lines[0]["message"], "hello there");
}

#[test]
fn unknown_sequence_fails_before_running() {
    let temp = Project::with_runbook(MINIMAL_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook(), "--sequence", "missing"])
        .stdin("")
        .fails()
        .stderr_has("cannot activate missing");
}

#[test]
fn bad_input_lines_are_reported_and_skipped() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook()])
        .stdin("jump\nflag door_open=true\n")
        .passes()
        .stderr_has("unknown command: jump")
        .stdout_eq("[door#0] door opened\n");
}
