//! # NARS CLI Module
//!
//! This module implements the CLI interface for the reasoning engine.
//!
//! ## Available Commands
//!
//! - `run` - Run a Narsese script
//! - `shell` - Interactive Narsese shell
//! - `parse` - Parse a term or sentence and print its canonical form
//! - `server` - Start the HTTP server
//! - `status` - Show engine status
//! - `config` - Print the effective configuration as TOML

mod commands;

use clap::{Parser, Subcommand};
use nars_core::NarsError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// NARS - a resource-bounded non-axiomatic reasoning engine
///
/// Feed it Narsese judgments, questions and goals; it answers questions
/// and executes operations.
#[derive(Parser, Debug)]
#[command(name = "nars")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML engine configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// RNG seed, overriding the configuration
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Snapshot file: loaded before the command if present, saved after
    /// commands that change the engine
    #[arg(short = 'S', long, global = true)]
    pub state: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a Narsese script
    Run {
        /// Script file: one sentence per line, `//` comments, a bare
        /// number runs that many cycles
        #[arg(short, long)]
        file: PathBuf,

        /// Cycles to run after the script
        #[arg(long, default_value = "0")]
        cycles: u64,
    },

    /// Interactive Narsese shell on stdin
    Shell,

    /// Parse a term or sentence
    Parse {
        /// Narsese text
        text: String,
    },

    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Show engine status
    Status,

    /// Print the effective configuration as TOML
    Config,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), NarsError> {
    let config = load_config(cli.config.as_deref(), cli.seed)?;
    let json_mode = cli.json_mode;
    let state = cli.state.as_deref();

    match cli.command {
        Some(Commands::Run { file, cycles }) => cmd_run(config, state, json_mode, &file, cycles),
        Some(Commands::Shell) => cmd_shell(config, state, json_mode),
        Some(Commands::Parse { text }) => cmd_parse(&text, json_mode),
        Some(Commands::Server { host, port }) => cmd_server(config, state, &host, port).await,
        Some(Commands::Config) => cmd_config(&config),
        Some(Commands::Status) | None => cmd_status(config, state, json_mode),
    }
}
