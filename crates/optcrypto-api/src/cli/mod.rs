//! CLI command definitions for the `optcrypto` binary.

pub mod candidates;
pub mod catalogue;
pub mod probe;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Inspect runtime discovery of the optional cryptography library.
#[derive(Parser)]
#[command(name = "optcrypto", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for binding diagnostics, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover and bind the library, then report what was found.
    Probe {
        /// Exit with an error when the library is unavailable.
        #[arg(long)]
        require: bool,
    },

    /// List the symbol catalogue.
    #[command(alias = "symbols")]
    Catalogue,

    /// List library candidates in the order they are tried.
    Candidates,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
