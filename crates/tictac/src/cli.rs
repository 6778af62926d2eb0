//! Command-line interface for tictac.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictac_core::Position;

/// Tic-tac-toe against the clock, with chaos after every tie
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Two-player tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal (mouse, arrow keys or numeric keypad)
    Play(RoundArgs),

    /// Feed a move list through a round and print the final state as JSON
    Simulate {
        /// Comma-separated cells, as indices 0-8 or labels like `center`
        #[arg(long, value_delimiter = ',', value_parser = parse_position, required = true)]
        moves: Vec<Position>,

        /// Round settings
        #[command(flatten)]
        round: RoundArgs,
    },
}

/// Settings shared by every command. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RoundArgs {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "tictac.toml")]
    pub config: PathBuf,

    /// Countdown length in seconds
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Disable random marks after a tie
    #[arg(long)]
    pub no_chaos: bool,

    /// Seed for chaos placements
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name of the X player
    #[arg(long)]
    pub player_x: Option<String>,

    /// Name of the O player
    #[arg(long)]
    pub player_o: Option<String>,
}

fn parse_position(s: &str) -> Result<Position, String> {
    Position::from_label_or_number(s)
        .ok_or_else(|| format!("'{}' is not a cell (use 0-8 or a label like top-left)", s))
}
