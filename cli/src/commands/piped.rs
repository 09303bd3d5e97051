//! # shexec Piped Handler
//!
//! File: cli/src/commands/piped.rs
//!
//! Implements `shexec piped`, which prints `true` when standard input is a
//! named pipe and `false` otherwise. Handy in scripts that need to know
//! whether they can prompt.
//!
use crate::{common::system, core::error::Result};
use clap::Parser;
use tracing::info;

/// Arguments for `shexec piped`. Takes none.
#[derive(Parser, Debug)]
#[command(about = "Report whether standard input is a pipe")]
pub struct PipedArgs {}

/// Handles `shexec piped`.
pub async fn handle_piped(_args: PipedArgs) -> Result<()> {
    info!("Handling piped command...");
    let piped = system::is_piped_stdin()?;
    println!("{}", piped);
    Ok(())
}
