//! # shexec Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout shexec. Errors are
//! surfaced to the caller as-is: the prompt and the executor never retry,
//! suppress, or rewrite a failure.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ShexecError`: A custom error enum using `thiserror` for the specific failure kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error kinds cover:
//! - I/O failures on the prompt streams or the stdin metadata query
//! - Interpreter lookup/start failures
//! - Non-zero interpreter exits (code or signal kept in the payload)
//! - Cancellation of a running command
//! - Configuration problems
//!
//! ## Examples
//!
//! ```rust,ignore
//! match process::execute_shell_command(&cancel, &mut out, "false").await {
//!     Ok(()) => {}
//!     Err(e) if matches!(e.downcast_ref::<ShexecError>(), Some(ShexecError::Cancelled { .. })) => {
//!         println!("Command was cancelled");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error type for shexec.
#[derive(Error, Debug)]
pub enum ShexecError {
    /// Reading from or writing to a stream failed, or stdin could not be stat'ed.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The interpreter binary could not be found or started.
    #[error("Failed to start interpreter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The interpreter ran but did not exit successfully.
    #[error("Command '{command}' failed: {status}")]
    ExitStatus { command: String, status: ExitStatus },

    #[error("Command '{command}' was cancelled before it finished")]
    Cancelled { command: String },

    #[error("No valid confirmation after {attempts} attempts")]
    TooManyAttempts { attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No command given. Pass one after `--` or pipe it on stdin.")]
    NoCommand,
}

impl ShexecError {
    /// Exit code of a failed command, if the process exited normally.
    /// `None` for every other kind, and for signal terminations.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ShexecError::ExitStatus { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
