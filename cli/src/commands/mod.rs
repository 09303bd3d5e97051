//! # shexec Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level subcommands of the `shexec` CLI. Each module
//! defines its own clap arguments struct and an async `handle_*` function
//! called from `main.rs`.
//!
//! - `piped`: Reports whether standard input is a pipe
//! - `run`: Asks for confirmation, then runs a command through the host shell
//!

/// `shexec piped`: prints whether stdin is a named pipe.
pub mod piped;
/// `shexec run`: confirmation-gated command execution.
pub mod run;
