//! CLI command definitions and dispatch for the `tgpt` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are flat verbs
//! (`tgpt new`, `tgpt select`) matching the session-oriented workflow: one
//! invocation, one exchange or one management action.

pub mod chat;
pub mod config;
pub mod picker;
pub mod render;
pub mod session;
pub mod term;

use clap::{Parser, Subcommand};

/// Chat with an LLM from your terminal, with persisted sessions.
#[derive(Parser)]
#[command(name = "tgpt", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new session with an opening prompt.
    New {
        /// Opening prompt (read interactively if omitted).
        prompt: Option<String>,
    },

    /// Continue the active session with a follow-up prompt.
    Cont {
        /// Follow-up prompt (read interactively if omitted).
        prompt: Option<String>,
    },

    /// Pick the active session from the saved ones.
    Select,

    /// Toggle logging output on or off.
    Log,

    /// Print the active session's transcript.
    History,

    /// Show the current configuration.
    Config,

    /// Delete a saved session.
    Delete,
}
