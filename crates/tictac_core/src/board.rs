//! The 3x3 board.

use crate::error::{BoardError, BoardErrorKind};
use crate::rules::{self, WinLine};
use crate::types::{Cell, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// 3x3 tic-tac-toe board.
///
/// Cells are only ever changed through [`Board::place`] and [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
        debug!("Board cleared");
    }

    /// True iff `index` is on the board and the cell is empty.
    pub fn is_valid_move(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Cell::Empty))
    }

    /// Marks the cell at `index` with `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::InvalidMove`] when the cell is occupied or
    /// `index` is outside 0-8. The board is unchanged in that case.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, symbol: Symbol) -> Result<(), BoardError> {
        if !self.is_valid_move(index) {
            return Err(BoardError::new(BoardErrorKind::InvalidMove(index)));
        }
        self.cells[index] = Cell::Mark(symbol);
        Ok(())
    }

    /// Returns the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::IndexOutOfRange`] when `index >= 9`.
    #[track_caller]
    pub fn cell_at(&self, index: usize) -> Result<Cell, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| BoardError::new(BoardErrorKind::IndexOutOfRange(index)))
    }

    /// First completed line in static order, if any.
    pub fn winning_line(&self) -> Option<WinLine> {
        rules::winning_line(self)
    }

    /// Symbol holding the winning line, if any.
    pub fn winner(&self) -> Option<Symbol> {
        rules::winner(self)
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Full board without a winning line.
    pub fn is_tie(&self) -> bool {
        rules::is_tie(self)
    }

    /// Indices of empty cells, ascending.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Cell contents as symbols, for renderers.
    pub fn symbols(&self) -> [Option<Symbol>; CELL_COUNT] {
        self.cells.map(Cell::symbol)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Mark(symbol) => write!(f, "{}", symbol)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
