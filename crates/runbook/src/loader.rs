// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading runbooks from disk.
//!
//! A runbook is either a single `.toml` file or a directory of them. Files
//! in a directory are read in name order and merged; a sequence name may
//! only be defined once across the whole directory.

use crate::parser::{parse_runbook, ParseError, Runbook};
use crate::validator::{validate_runbook, ValidationErrors};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during runbook loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading runbook file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse error
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Validation error
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Same sequence name in two files
    #[error("Sequence '{name}' in {path} is already defined in {first}")]
    DuplicateSequence {
        name: String,
        path: PathBuf,
        first: PathBuf,
    },
}

/// Load and validate a single runbook file
pub fn load_runbook_file(path: &Path) -> Result<Runbook, LoadError> {
    let runbook = read_file(path)?;
    validate_runbook(&runbook)?;
    tracing::debug!(
        path = %path.display(),
        sequences = runbook.sequences.len(),
        "loaded runbook"
    );
    Ok(runbook)
}

/// Load every `.toml` file in `dir` into one validated runbook
pub fn load_runbook_dir(dir: &Path) -> Result<Runbook, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();

    let mut merged = Runbook::default();
    let mut origins: Vec<(String, PathBuf)> = Vec::new();
    for path in files {
        let runbook = read_file(&path)?;
        for (name, sequence) in runbook.sequences {
            if let Some((_, first)) = origins.iter().find(|(n, _)| *n == name) {
                return Err(LoadError::DuplicateSequence {
                    name,
                    path,
                    first: first.clone(),
                });
            }
            origins.push((name.clone(), path.clone()));
            merged.sequences.insert(name, sequence);
        }
    }

    validate_runbook(&merged)?;
    tracing::debug!(
        dir = %dir.display(),
        sequences = merged.sequences.len(),
        "loaded runbook directory"
    );
    Ok(merged)
}

/// Load from a file or a directory, whichever `path` is
pub fn load_runbook(path: &Path) -> Result<Runbook, LoadError> {
    if path.is_dir() {
        load_runbook_dir(path)
    } else {
        load_runbook_file(path)
    }
}

fn read_file(path: &Path) -> Result<Runbook, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_runbook(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
