// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host commands read line by line from stdin

use cue_engine::HostEvent;

/// One parsed stdin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(HostEvent),
    Status,
    Quit,
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "flag" => {
            let (flag, value) = parse_flag(rest)?;
            Command::Event(HostEvent::SetFlag { flag, value })
        }
        "signal" => Command::Event(HostEvent::Signal {
            name: single_name(verb, rest)?,
        }),
        "activate" => Command::Event(HostEvent::Activate {
            sequence: single_name(verb, rest)?,
        }),
        "deactivate" => Command::Event(HostEvent::Deactivate {
            sequence: single_name(verb, rest)?,
        }),
        "status" => no_arguments(verb, rest, Command::Status)?,
        "quit" | "exit" => no_arguments(verb, rest, Command::Quit)?,
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(Some(command))
}

/// Parse `NAME=BOOL`, as used by `--flag` and the `flag` command
pub fn parse_flag(s: &str) -> Result<(String, bool), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=BOOL, got: {}", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing flag name in: {}", s));
    }
    let value = match value.trim() {
        "true" | "on" | "1" => true,
        "false" | "off" | "0" => false,
        other => return Err(format!("invalid flag value: {}", other)),
    };
    Ok((name.to_string(), value))
}

fn single_name(verb: &str, rest: &str) -> Result<String, String> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [name] => Ok((*name).to_string()),
        [] => Err(format!("{} needs a name", verb)),
        _ => Err(format!("{} takes exactly one name", verb)),
    }
}

fn no_arguments(verb: &str, rest: &str, command: Command) -> Result<Command, String> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(format!("{} takes no arguments", verb))
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
