//! # shexec CLI Piped Integration Tests
//!
//! File: cli/tests/piped.rs
//!
//! `shexec piped` against a real pipe and against the null device.
//!

mod common;
use assert_cmd::prelude::*;
use common::*;

#[cfg(unix)]
#[test]
fn test_piped_with_pipe_on_stdin() {
    shexec_cmd()
        .arg("piped")
        .write_stdin("")
        .assert()
        .success()
        .stdout("true\n");
}

#[cfg(unix)]
#[test]
fn test_piped_with_null_stdin() {
    // assert_cmd always pipes stdin, so build the process by hand.
    std::process::Command::new(assert_cmd::cargo::cargo_bin("shexec"))
        .arg("piped")
        .stdin(std::process::Stdio::null())
        .assert()
        .success()
        .stdout("false\n");
}
