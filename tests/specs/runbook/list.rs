//! Runbook list specs
//!
//! Verify `cue list` summarises sequences as a table or JSON.

use crate::prelude::*;

#[test]
fn list_empty_directory() {
    let temp = Project::empty();
    temp.file("runbooks/README.md", "nothing here");
    temp.cue()
        .args(&["list", "runbooks"])
        .passes()
        .stdout_eq("No sequences\n");
}

#[test]
fn list_shows_a_table() {
    let temp = Project::empty();
    temp.file("runbooks/a.toml", MINIMAL_RUNBOOK);
    temp.file("runbooks/b.toml", GATED_RUNBOOK);

    let output = temp.cue().args(&["list", "runbooks"]).passes();
    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("NAME"));
    assert!(lines[0].ends_with("CONDITION"));

    let door: Vec<&str> = lines[1].split_whitespace().collect();
    assert_eq!(door, vec!["door", "3", "yes", "2", "flag"]);
    let hello: Vec<&str> = lines[2].split_whitespace().collect();
    assert_eq!(hello, vec!["hello", "1", "no", "0", "-"]);
}

#[test]
fn list_json_is_machine_readable() {
    let temp = Project::with_runbook(GATED_RUNBOOK);
    let output = temp
        .cue()
        .args(&["list", &temp.runbook(), "--json"])
        .passes();

    let value: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "door");
    assert_eq!(value[0]["nodes"], 3);
    assert_eq!(value[0]["repeatable"], true);
    assert_eq!(value[0]["final_nodes"], serde_json::json!([2]));
    assert_eq!(value[0]["condition"], "flag");
}
