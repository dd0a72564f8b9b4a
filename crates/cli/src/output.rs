// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use cue_adapters::HostMessage;
use cue_engine::SequenceStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON document per line (pretty-printed for listings)
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Print a message a sequence sent to the host
pub fn print_message(message: &HostMessage, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", format_message(message)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(message) {
                println!("{}", json);
            }
        }
    }
}

/// Print a status reply from the director
pub fn print_status(statuses: &[SequenceStatus], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for status in statuses {
                println!("{}", format_status(status));
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(statuses) {
                println!("{}", json);
            }
        }
    }
}

pub fn format_message(message: &HostMessage) -> String {
    match message {
        HostMessage::Emit {
            sequence,
            node: Some(node),
            message,
        } => format!("[{}#{}] {}", sequence, node, message),
        HostMessage::Emit {
            sequence,
            node: None,
            message,
        } => format!("[{}] {}", sequence, message),
    }
}

pub fn format_status(status: &SequenceStatus) -> String {
    let state = if status.retired {
        "retired"
    } else if status.run.finished {
        "finished"
    } else if status.active {
        "active"
    } else {
        "inactive"
    };
    let mut line = format!(
        "{}: {} {}/{} complete",
        status.name,
        state,
        status.snapshot.completed(),
        status.snapshot.nodes.len()
    );
    if let Some(checkpoint) = status.run.last_checkpoint {
        line.push_str(&format!(", checkpoint {}", checkpoint));
    }
    if status.run.failures > 0 {
        line.push_str(&format!(", {} failure(s)", status.run.failures));
    }
    line
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
