//! # shexec CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`main_tests.rs`, `run.rs`,
//! `piped.rs`). Each of those is compiled as its own test crate and runs the
//! compiled `shexec` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use tempfile::TempDir;

/// The exact prompt text printed before each answer is read.
pub const PROMPT: &str = "Do you want to execute this command? (Y/n) ";

/// # Get shexec Command (`shexec_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `shexec` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn shexec_cmd() -> Command {
    Command::cargo_bin("shexec").expect("Failed to find shexec binary for testing")
}

/// Like `shexec_cmd`, but running inside an empty temporary directory with
/// `RUST_LOG` cleared, so no stray `.shexec.toml` or log output leaks in.
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn isolated_cmd() -> (Command, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
    let mut cmd = shexec_cmd();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SHEXEC_CONFIG");
    (cmd, dir)
}
