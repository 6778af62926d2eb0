//! Headless rounds driven by a fixed move list.

use crate::config::AppConfig;
use tictac_core::{Position, RoundController, RoundSnapshot};
use tracing::{info, instrument};

/// Plays `moves` in order through a fresh controller and returns the final
/// snapshot. Rejected moves are skipped, exactly as in the interactive game.
#[instrument(skip(config), fields(moves = moves.len()))]
pub fn simulate(config: &AppConfig, moves: &[Position]) -> RoundSnapshot {
    let mut round = RoundController::new(config.build_players(), config.round().clone());
    for &position in moves {
        let outcome = round.make_move(position.to_index());
        info!(%position, %outcome, "Simulated move");
    }
    round.snapshot()
}

/// Runs [`simulate`] and renders the snapshot as pretty JSON.
pub fn simulate_json(config: &AppConfig, moves: &[Position]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&simulate(config, moves))
}
