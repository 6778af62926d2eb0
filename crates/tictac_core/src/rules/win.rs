//! Win detection logic for tic-tac-toe.

use crate::{Board, Symbol};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three cell indices forming a row, column or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([usize; 3]);

impl WinLine {
    /// Returns the three cell indices.
    pub fn indices(self) -> [usize; 3] {
        self.0
    }

    /// Checks whether the line passes through `index`.
    pub fn contains(self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// The eight winning lines: rows, then columns, then diagonals.
///
/// Order decides which line is reported when one move completes several.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    // Columns
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    // Diagonals
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

/// Returns the first line whose three cells hold the same mark.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<WinLine> {
    let cells = board.cells();
    WIN_LINES.into_iter().find(|line| {
        let [a, b, c] = line.indices();
        !cells[a].is_empty() && cells[a] == cells[b] && cells[a] == cells[c]
    })
}

/// Returns the symbol holding a complete line, if any.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Symbol> {
    winning_line(board).and_then(|line| board.cells()[line.indices()[0]].symbol())
}
