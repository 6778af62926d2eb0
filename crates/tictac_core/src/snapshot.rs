//! Serializable read model of a round.

use crate::board::CELL_COUNT;
use crate::chaos::Dice;
use crate::controller::{RoundController, RoundState};
use crate::types::Symbol;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Cell contents in row-major order.
    pub board: [Option<Symbol>; CELL_COUNT],
    /// Lifecycle state.
    pub state: RoundState,
    /// Name of the player to move.
    pub current_player: String,
    /// Symbol of the player to move.
    pub current_symbol: Symbol,
    /// Ties so far.
    pub score: u32,
    /// Round number, starting at 1.
    pub round: u32,
    /// Whole seconds left on the countdown, rounded up.
    pub remaining_secs: u64,
    /// Indices of the winning line while the round is won.
    pub winning_line: Option<[usize; 3]>,
}

impl RoundSnapshot {
    /// Captures the controller's current state.
    pub fn capture<D: Dice>(controller: &RoundController<D>) -> Self {
        let remaining = controller.remaining();
        Self {
            board: controller.board().symbols(),
            state: controller.state(),
            current_player: controller.current_player().name().to_string(),
            current_symbol: controller.current_symbol(),
            score: controller.score(),
            round: controller.round(),
            remaining_secs: remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0),
            winning_line: controller.winning_line().map(|line| line.indices()),
        }
    }
}
