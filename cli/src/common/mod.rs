//! # shexec Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers in `commands::`:
//!
//! - **`process`**: Interpreter selection and command execution, plain or behind a confirmation.
//! - **`system`**: Host inspection, such as detecting piped standard input.
//! - **`ui`**: The yes/no confirmation prompt.
//!

/// Utilities for executing commands through the host shell.
pub mod process;
/// Utilities for system-level checks (piped stdin detection).
pub mod system;
/// Utilities for terminal interaction (confirmation prompt).
pub mod ui;
