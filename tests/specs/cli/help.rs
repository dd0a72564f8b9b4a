//! CLI help specs
//!
//! Verify the top-level surface: subcommands and usage errors.

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();
    temp.cue()
        .args(&["--help"])
        .passes()
        .stdout_has("check")
        .stdout_has("list")
        .stdout_has("run");
}

#[test]
fn run_help_documents_flags() {
    let temp = Project::empty();
    temp.cue()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--sequence")
        .stdout_has("--flag")
        .stdout_has("--tick-ms")
        .stdout_has("--json");
}

#[test]
fn missing_subcommand_fails() {
    let temp = Project::empty();
    temp.cue().fails().stderr_has("Usage");
}

#[test]
fn malformed_flag_argument_fails() {
    let temp = Project::with_runbook(MINIMAL_RUNBOOK);
    temp.cue()
        .args(&["run", &temp.runbook(), "--flag", "door_open"])
        .fails()
        .stderr_has("NAME=BOOL");
}
