//! # shexec Library Root
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! shexec runs shell commands behind a yes/no confirmation. The pieces are
//! usable on their own:
//!
//! - `common::system::is_piped_stdin`: is standard input a named pipe?
//! - `common::ui::prompt::get_user_confirmation`: ask and read a one-character answer.
//! - `common::process::execute_shell_command`: run a string through `bash -c` / `cmd /C`.
//! - `common::process::execute_command_with_confirmation`: the two combined.
//!
//! The `shexec` binary (`main.rs`) wires these to the terminal.
//!
pub mod commands;
pub mod common;
pub mod core;
