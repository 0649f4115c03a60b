//! optcrypto diagnostic CLI entry point.
//!
//! Binary name: `optcrypto`
//!
//! Parses CLI arguments, loads the loader configuration, then dispatches to
//! the requested diagnostic command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,optcrypto_core=debug,optcrypto_infra=debug",
        _ => "trace",
    };

    optcrypto_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "optcrypto", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.clone()).await;

    let result = match cli.command {
        Commands::Probe { require } => cli::probe::probe(&state, require, cli.json),
        Commands::Catalogue => cli::catalogue::list_catalogue(&state, cli.json),
        Commands::Candidates => cli::candidates::list_candidates(&state, cli.json),
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    optcrypto_observe::tracing_setup::shutdown_tracing();
    result
}
