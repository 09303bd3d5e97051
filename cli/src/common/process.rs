//! # shexec Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Runs a command string through the host shell and streams its standard
//! output to a caller-supplied writer.
//!
//! ## Architecture
//!
//! - **`Interpreter`**: which program runs the string and which flag makes it
//!   run the string literally. `Interpreter::host()` picks `cmd /C` on Windows
//!   and `bash -c` everywhere else; any other pairing can be supplied by the
//!   caller without touching the executor.
//! - **`execute_shell_command` / `execute_with_interpreter`**: spawn the
//!   interpreter, copy its stdout into the writer, and wait for exit or for the
//!   cancellation token, whichever happens first. Stdin and stderr are
//!   inherited, so the child's error output is not captured.
//! - **`execute_command_with_confirmation`**: asks first, runs only on "yes".
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::common::process;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let cancel = CancellationToken::new();
//! let mut input = tokio::io::BufReader::new(tokio::io::stdin());
//! let mut output = tokio::io::stdout();
//! process::execute_command_with_confirmation(&cancel, &mut input, &mut output, "ls -la").await?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::ui::prompt::{self, ConfirmOptions};
use crate::core::error::{Result, ShexecError};
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A shell program plus the flag that makes it execute its next argument
/// as a command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    program: String,
    flag: String,
}

impl Interpreter {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    /// Maps an OS identifier (as in `std::env::consts::OS`) to its interpreter.
    pub fn for_os(os: &str) -> Self {
        match os {
            "windows" => {
                debug!("Running on Windows - using cmd");
                Self::new("cmd", "/C")
            }
            _ => {
                debug!("Running on Linux like OS - using bash");
                Self::new("bash", "-c")
            }
        }
    }

    /// The interpreter for the OS this binary was built for.
    pub fn host() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Builds the process invocation for `command`. The string is passed as a
    /// single argument; no quoting or parsing happens here.
    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.flag).arg(command);
        cmd
    }
}

/// Runs `command` with the host interpreter. See `execute_with_interpreter`.
pub async fn execute_shell_command<W>(
    cancel: &CancellationToken,
    output: &mut W,
    command: &str,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    execute_with_interpreter(&Interpreter::host(), cancel, output, command).await
}

/// Runs `command` through `interpreter`, streaming the child's stdout into
/// `output` until it exits.
///
/// If `cancel` fires first the child is killed and reaped before
/// `ShexecError::Cancelled` is returned. A token that is already cancelled
/// prevents the spawn altogether.
///
/// ## Errors
///
/// * `ShexecError::Spawn` if the interpreter cannot be found or started.
/// * `ShexecError::ExitStatus` if it exits unsuccessfully (the status keeps
///   the exit code or terminating signal).
/// * `ShexecError::Cancelled` on cancellation.
/// * `ShexecError::Io` if copying into `output` fails; the child is killed.
pub async fn execute_with_interpreter<W>(
    interpreter: &Interpreter,
    cancel: &CancellationToken,
    output: &mut W,
    command: &str,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if cancel.is_cancelled() {
        return Err(ShexecError::Cancelled {
            command: command.to_string(),
        }
        .into());
    }

    let mut child = interpreter
        .command(command)
        .stdout(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ShexecError::Spawn {
            program: interpreter.program().to_string(),
            source,
        })?;
    debug!(
        "Spawned '{} {}' (pid {:?})",
        interpreter.program(),
        interpreter.flag(),
        child.id()
    );

    let mut stdout = child.stdout.take().ok_or_else(|| {
        ShexecError::from(std::io::Error::other("child stdout was not captured"))
    })?;

    let finished = {
        let run = async {
            tokio::io::copy(&mut stdout, output).await?;
            output.flush().await?;
            child.wait().await
        };
        tokio::select! {
            status = run => Some(status),
            () = cancel.cancelled() => None,
        }
    };

    match finished {
        Some(Ok(status)) if status.success() => {
            debug!("Command executed successfully");
            Ok(())
        }
        Some(Ok(status)) => Err(ShexecError::ExitStatus {
            command: command.to_string(),
            status,
        }
        .into()),
        Some(Err(e)) => {
            // Output went away mid-stream; don't leave the child behind.
            if let Err(kill_err) = child.kill().await {
                warn!("Failed to kill child after I/O error: {}", kill_err);
            }
            Err(ShexecError::from(e).into())
        }
        None => {
            debug!("Cancellation requested, killing '{}'", command);
            if let Err(kill_err) = child.kill().await {
                warn!("Failed to kill cancelled child: {}", kill_err);
            }
            Err(ShexecError::Cancelled {
                command: command.to_string(),
            }
            .into())
        }
    }
}

/// Prompts on `input`/`output` and runs `command` only when the user agrees.
///
/// A denial is not an error: nothing runs and `Ok(())` is returned with only
/// the prompt written to `output`. Prompt errors are propagated and the
/// command does not run.
pub async fn execute_command_with_confirmation<R, W>(
    cancel: &CancellationToken,
    input: &mut R,
    output: &mut W,
    command: &str,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    execute_with_options(
        &Interpreter::host(),
        ConfirmOptions::default(),
        cancel,
        input,
        output,
        command,
    )
    .await
}

/// `execute_command_with_confirmation` with an explicit interpreter and
/// prompt options.
pub async fn execute_with_options<R, W>(
    interpreter: &Interpreter,
    options: ConfirmOptions,
    cancel: &CancellationToken,
    input: &mut R,
    output: &mut W,
    command: &str,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if prompt::get_user_confirmation_with(input, output, options).await? {
        execute_with_interpreter(interpreter, cancel, output, command).await
    } else {
        Ok(())
    }
}
