//! Error types for board access and move handling.

use crate::controller::RoundState;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while touching the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoardErrorKind {
    /// Placement on an occupied or out-of-range cell.
    #[display("Invalid move at cell {}", _0)]
    InvalidMove(usize),
    /// Cell access outside 0-8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    IndexOutOfRange(usize),
}

/// Board error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Board error: {} at {}:{}", kind, file, line)]
pub struct BoardError {
    /// Error kind.
    pub kind: BoardErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: BoardErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Error returned by the explicit move path of the round controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The cell is occupied or outside the board.
    #[display("Cell {} is not a valid move", _0)]
    InvalidMove(#[error(not(source))] usize),

    /// The round has ended and awaits a reset.
    #[display("Round is over ({:?}); reset to keep playing", _0)]
    RoundOver(#[error(not(source))] RoundState),
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err.kind {
            BoardErrorKind::InvalidMove(index) | BoardErrorKind::IndexOutOfRange(index) => {
                MoveError::InvalidMove(index)
            }
        }
    }
}
