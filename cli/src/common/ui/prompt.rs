//! # shexec Confirmation Prompt (`common::ui::prompt`)
//!
//! File: cli/src/common/ui/prompt.rs
//!
//! ## Overview
//!
//! Asks the user whether a command should run. The prompt is written to an
//! output stream and a single character is read from an input stream:
//!
//! - Enter (`\n` or `\r`), `Y` or `y` confirm.
//! - `N` or `n` deny.
//! - Anything else is logged and the prompt is written again.
//!
//! The loop has no cap unless `ConfirmOptions::max_attempts` is set. An EOF
//! on the input stream is an error, never a default answer.
//!
//! ## Architecture
//!
//! Both streams are generic (`AsyncBufRead` / `AsyncWrite`) so the same code
//! drives the terminal in the binary and in-memory buffers in tests. The
//! reader is held for the whole loop, so bytes buffered after a rejected
//! character are still seen by the next attempt.
//!
use crate::core::error::{Result, ShexecError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Text written before every read.
pub const CONFIRMATION_PROMPT: &str = "Do you want to execute this command? (Y/n) ";

/// Tuning for `get_user_confirmation_with`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmOptions {
    /// Maximum number of prompts before giving up. `None` retries forever.
    pub max_attempts: Option<u32>,
}

/// Prompts until a recognised answer is read. Retries forever.
pub async fn get_user_confirmation<R, W>(input: &mut R, output: &mut W) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    get_user_confirmation_with(input, output, ConfirmOptions::default()).await
}

/// Prompts until a recognised answer is read or `options.max_attempts`
/// prompts have gone unanswered.
///
/// ## Errors
///
/// * `ShexecError::Io` if writing the prompt or reading a character fails,
///   including EOF on `input`.
/// * `ShexecError::TooManyAttempts` once the attempt cap is reached.
pub async fn get_user_confirmation_with<R, W>(
    input: &mut R,
    output: &mut W,
    options: ConfirmOptions,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut attempts: u32 = 0;
    loop {
        if let Some(max) = options.max_attempts {
            if attempts >= max {
                return Err(ShexecError::TooManyAttempts { attempts }.into());
            }
        }
        attempts += 1;

        output
            .write_all(CONFIRMATION_PROMPT.as_bytes())
            .await
            .map_err(ShexecError::from)?;
        output.flush().await.map_err(ShexecError::from)?;

        let answer = read_char(input).await.map_err(ShexecError::from)?;
        match answer {
            '\n' | '\r' | 'Y' | 'y' => {
                debug!("User confirmed");
                return Ok(true);
            }
            'N' | 'n' => {
                debug!("User denied");
                return Ok(false);
            }
            other => {
                debug!("User entered unrecognised input for confirmation: {:?}", other);
            }
        }
    }
}

/// Reads one UTF-8 encoded character.
///
/// Continuation bytes are peeked from the buffer and consumed only while they
/// extend a valid sequence, so a malformed or truncated sequence yields
/// `char::REPLACEMENT_CHARACTER` and the byte that broke it is left for the
/// next read.
async fn read_char<R: AsyncBufRead + Unpin>(input: &mut R) -> std::io::Result<char> {
    let first = input.read_u8().await?;
    // Width and the allowed range of the second byte, which excludes overlong
    // encodings, surrogates and code points above U+10FFFF.
    let (width, second) = match first {
        0x00..=0x7f => return Ok(char::from(first)),
        0xc2..=0xdf => (2, 0x80..=0xbf),
        0xe0 => (3, 0xa0..=0xbf),
        0xed => (3, 0x80..=0x9f),
        0xe1..=0xef => (3, 0x80..=0xbf),
        0xf0 => (4, 0x90..=0xbf),
        0xf4 => (4, 0x80..=0x8f),
        0xf1..=0xf3 => (4, 0x80..=0xbf),
        _ => return Ok(char::REPLACEMENT_CHARACTER),
    };

    let mut buf = [first, 0, 0, 0];
    for (i, slot) in buf.iter_mut().enumerate().take(width).skip(1) {
        let Some(&next) = input.fill_buf().await?.first() else {
            return Ok(char::REPLACEMENT_CHARACTER);
        };
        let allowed = if i == 1 { second.clone() } else { 0x80..=0xbf };
        if !allowed.contains(&next) {
            return Ok(char::REPLACEMENT_CHARACTER);
        }
        input.consume(1);
        *slot = next;
    }
    Ok(std::str::from_utf8(&buf[..width])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER))
}
