//! CLI module
//!
//! This module provides the command-line interface for Interview-Prep,
//! including argument parsing, interactive prompts and top-level handlers.

pub mod commands;
pub mod prompt;

// Re-exports
pub use commands::{Cli, ListModelsCli};
pub use prompt::{read_session_input, Prompter};
