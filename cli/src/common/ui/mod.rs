//! # shexec UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal interaction helpers. The only element today is the yes/no
//! confirmation prompt shown before a command runs.
//!
//! - **`prompt`**: Writes the prompt and reads single-character answers.
//!

/// Yes/no confirmation prompt.
pub mod prompt;
