//! CLI argument definitions for Jarvis.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Jarvis -- a voice and text command assistant.
#[derive(Parser)]
#[command(
    name = "jarvis",
    version,
    about = "Jarvis -- voice and text command assistant",
    long_about = "Understands short commands such as \"open chrome\", \"search for cats on \
                  youtube\" or \"what time is it\" and carries them out on this machine."
)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Never call the conversational AI, even when an API key is set.
    #[arg(long, global = true)]
    pub no_ai: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive command loop.
    Repl,

    /// Execute one command and print the intent and result as JSON.
    Run {
        /// The command text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Classify a command and print the intent as JSON without executing it.
    Classify {
        /// The command text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show readiness of the classifier and collaborators.
    Status,
}
