//! Tie detection logic for tic-tac-toe.

use super::win::winning_line;
use crate::Board;
use tracing::instrument;

/// Checks if the board is full (all cells marked).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.is_empty())
}

/// A full board with no winning line.
#[instrument(skip(board))]
pub fn is_tie(board: &Board) -> bool {
    is_full(board) && winning_line(board).is_none()
}
