//! tictac - terminal tic-tac-toe against the clock.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use tictac::cli::{Cli, Command, RoundArgs};
use tictac::config::AppConfig;
use tictac::simulate::simulate_json;
use tictac::tui::run_tui;
use tictac_core::{Position, RoundController};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(round) => play(round).await,
        Command::Simulate { moves, round } => run_simulation(moves, round),
    }
}

/// Run the interactive game. Logs go to a file so they don't tear the screen.
async fn play(args: RoundArgs) -> Result<()> {
    let log_file = std::fs::File::create("tictac.log").context("Failed to create tictac.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictac_core=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    let config = AppConfig::load(&args).context("Failed to load configuration")?;
    info!(
        round_secs = config.round().round_secs(),
        chaos = config.round().chaos(),
        "Starting game"
    );

    let round = RoundController::new(config.build_players(), config.round().clone());
    run_tui(round).await
}

/// Run a headless round and print its final state.
fn run_simulation(moves: Vec<Position>, args: RoundArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(&args).context("Failed to load configuration")?;
    let json = simulate_json(&config, &moves).context("Failed to render snapshot")?;
    println!("{}", json);
    Ok(())
}
