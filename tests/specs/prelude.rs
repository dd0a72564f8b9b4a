//! Shared fixtures for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;

/// One ungated sequence that emits and finishes for good
pub const MINIMAL_RUNBOOK: &str = r#"
[sequence.hello]
repeatable = false

[[sequence.hello.node]]
name = "greet"
final = true
actions = [{ type = "emit", message = "hello there" }]
"#;

/// A repeatable flag-gated sequence waiting on a signal
pub const GATED_RUNBOOK: &str = r#"
[sequence.door]
condition = { type = "flag", flag = "door_open" }

[[sequence.door.node]]
name = "announce"
actions = [{ type = "emit", message = "door opened" }]

[[sequence.door.node]]
name = "bell"
sequential = true
checkpoint = true
actions = [{ type = "await_signal", signal = "bell" }]

[[sequence.door.node]]
name = "done"
sequential = true
final = true
actions = [{ type = "emit", message = "bell rang" }]
"#;

/// A temporary directory holding runbook files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// A project with a single `runbook.toml`
    pub fn with_runbook(content: &str) -> Self {
        let project = Self::empty();
        project.file("runbook.toml", content);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn runbook(&self) -> String {
        self.path().join("runbook.toml").display().to_string()
    }

    pub fn file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn cue(&self) -> Cli {
        let mut cmd = Command::cargo_bin("cue").unwrap();
        cmd.current_dir(self.path()).env_remove("CUE_LOG");
        Cli {
            cmd,
            dir: self.path().to_path_buf(),
            args: Vec::new(),
        }
    }
}

/// Builder around one CLI invocation
pub struct Cli {
    cmd: Command,
    dir: PathBuf,
    args: Vec<String>,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self.args.extend(args.iter().map(|arg| arg.to_string()));
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let result = Output::from(output);
        assert!(
            result.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            result.stdout, result.stderr
        );
        result
    }

    /// Keep stdin open for `hold`, then close it and expect success
    pub fn hold_stdin(self, hold: Duration) -> Output {
        let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("cue"))
            .current_dir(&self.dir)
            .args(&self.args)
            .env_remove("CUE_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        std::thread::sleep(hold);
        drop(child.stdin.take());
        let result = Output::from(child.wait_with_output().unwrap());
        assert!(
            result.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            result.stdout, result.stderr
        );
        result
    }

    pub fn fails(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let result = Output::from(output);
        assert!(
            !result.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            result.stdout, result.stderr
        );
        result
    }
}

/// Captured result of a finished invocation
pub struct Output {
    success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    /// Stdout lines that parse as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}
