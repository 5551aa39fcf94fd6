//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Runs the compiled `mockexpr` binary.
pub struct MockExprProcess;

impl MockExprProcess {
    fn command(args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_mockexpr"));
        command
            .args(args)
            .env_remove("MOCKEXPR_CONFIG")
            .env_remove("MOCKEXPR_LOG_LEVEL")
            .env("NO_COLOR", "1");
        command
    }

    /// Runs with the given arguments and an empty stdin.
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::command(args)
            .stdin(Stdio::null())
            .output()
            .expect("failed to run mockexpr")
    }

    /// Runs with the given arguments, writing `input` to stdin.
    pub fn spawn_with_stdin(args: &[&str], input: &str) -> Output {
        let mut child = Self::command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn mockexpr");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("failed to write stdin");
        child.wait_with_output().expect("failed to wait for mockexpr")
    }
}

/// Path to a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
