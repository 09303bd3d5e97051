//! # shexec Run Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `shexec run`: show the command, ask for confirmation on the
//! terminal, and run it through the host shell only if the answer is yes.
//!
//! ## Architecture
//!
//! 1. Load configuration (`core::config`) and apply command-line overrides.
//! 2. Resolve the command string: the trailing arguments joined by spaces, or,
//!    when none are given and stdin is a pipe, the first line of stdin. The
//!    rest of stdin then answers the prompt.
//! 3. Ask via `common::ui::prompt` unless `--yes` / `assume_yes` is set.
//!    A "no" ends the command successfully.
//! 4. Create the cancellation token, hook Ctrl-C and the optional timeout to
//!    it, and run the command via `common::process`.
//!
//! ## Usage
//!
//! ```bash
//! shexec run -- ls -la
//! shexec run --yes --timeout 10 -- ./long-script.sh
//! printf 'echo hello\ny\n' | shexec run
//! ```
//!
use crate::{
    common::{
        process,
        system,
        ui::prompt::{self, ConfirmOptions},
    },
    core::{
        config,
        error::{Result, ShexecError},
    },
};
use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Arguments for `shexec run`.
#[derive(Parser, Debug)]
#[command(
    about = "Confirm, then execute a command through the host shell",
    long_about = "Prints a yes/no prompt and, if confirmed, runs the command with `bash -c` \
                  (or `cmd /C` on Windows), streaming its output to stdout."
)]
pub struct RunArgs {
    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Cancel the command after this many seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Give up after this many unrecognised answers.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: Option<u32>,

    /// Read configuration from this file instead of the user/project files.
    #[arg(long, value_name = "PATH", env = "SHEXEC_CONFIG")]
    config: Option<String>,

    /// The command to execute. Words are joined with single spaces and handed
    /// to the shell untouched. Read from stdin when omitted and stdin is a pipe.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// Handles `shexec run`.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    info!("Handling run command...");
    debug!("Run args: {:?}", args);

    let cfg = config::load_config(args.config.as_deref())
        .context("Failed to load shexec configuration")?;
    let assume_yes = args.yes || cfg.confirmation.assume_yes;
    let options = ConfirmOptions {
        max_attempts: args.max_attempts.or(cfg.confirm_options().max_attempts),
    };
    let timeout = args.timeout.map(Duration::from_secs).or(cfg.timeout());
    let interpreter = cfg.interpreter();

    let mut input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    let command = if args.command.is_empty() {
        if !system::is_piped_stdin()? {
            return Err(ShexecError::NoCommand.into());
        }
        read_command_line(&mut input).await?
    } else {
        args.command.join(" ")
    };
    debug!("Resolved command: {}", command);

    if !assume_yes {
        if !prompt::get_user_confirmation_with(&mut input, &mut output, options).await? {
            info!("Command not executed: user declined");
            return Ok(());
        }
    } else {
        debug!("Confirmation skipped");
    }

    let cancel = CancellationToken::new();
    let watchers = spawn_cancel_watchers(&cancel, timeout);
    let result =
        process::execute_with_interpreter(&interpreter, &cancel, &mut output, &command).await;
    for watcher in watchers {
        watcher.abort();
    }
    result
}

/// Reads the command from the first line of `input`, without its line ending.
async fn read_command_line<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .await
        .map_err(ShexecError::from)?;
    let command = line.trim_end_matches(['\n', '\r']).to_string();
    if command.trim().is_empty() {
        return Err(ShexecError::NoCommand.into());
    }
    Ok(command)
}

/// Cancels `cancel` on Ctrl-C, and after `timeout` when one is set.
fn spawn_cancel_watchers(
    cancel: &CancellationToken,
    timeout: Option<Duration>,
) -> Vec<JoinHandle<()>> {
    let mut watchers = Vec::new();

    let token = cancel.clone();
    watchers.push(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling command");
            token.cancel();
        }
    }));

    if let Some(timeout) = timeout {
        let token = cancel.clone();
        watchers.push(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            info!("Timeout of {:?} reached, cancelling command", timeout);
            token.cancel();
        }));
    }
    watchers
}
