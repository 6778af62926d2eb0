//! Commands fed into the round controller and what they produced.
//!
//! Input adapters translate clicks, key presses and clock ticks into
//! [`Command`]s; renderers read the returned [`Outcome`] or poll the
//! controller afterwards.

use crate::chaos::ChaosMark;
use crate::rules::WinLine;
use crate::types::Symbol;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A request reaching the controller from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// The current player asked to mark cell `index`.
    MoveRequested(usize),
    /// Time passed on the event loop's clock.
    Tick(Duration),
    /// Start a fresh round.
    Reset,
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Occupied cell, bad index or finished round; nothing changed.
    Ignored,
    /// Mark placed, play passes to `next`.
    Placed {
        /// Cell marked.
        index: usize,
        /// Symbol placed.
        symbol: Symbol,
        /// Symbol to move next.
        next: Symbol,
    },
    /// The mark completed `line`.
    Won {
        /// Cell marked.
        index: usize,
        /// Winning symbol.
        symbol: Symbol,
        /// Completed line.
        line: WinLine,
    },
    /// The mark filled the board; a new round has already begun.
    Tied {
        /// Cell marked.
        index: usize,
        /// Symbol placed.
        symbol: Symbol,
        /// Score after the tie.
        score: u32,
        /// Marks seeded onto the new board.
        chaos: Vec<ChaosMark>,
    },
}

impl MoveOutcome {
    /// Whether the request changed anything.
    pub fn is_ignored(&self) -> bool {
        matches!(self, MoveOutcome::Ignored)
    }
}

/// Result of a clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// No round started yet.
    Idle,
    /// Countdown still running.
    Running(Duration),
    /// Countdown hit zero on this tick.
    Expired,
    /// No countdown armed (round over).
    Stopped,
}

/// Result of any [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// From [`Command::MoveRequested`].
    Move(MoveOutcome),
    /// From [`Command::Tick`].
    Tick(TickOutcome),
    /// From [`Command::Reset`].
    Reset,
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveOutcome::Ignored => write!(f, "Move ignored"),
            MoveOutcome::Placed { index, symbol, next } => {
                write!(f, "{} took cell {}, {} to move", symbol, index + 1, next)
            }
            MoveOutcome::Won { symbol, .. } => write!(f, "{} wins the round", symbol),
            MoveOutcome::Tied { score, .. } => write!(f, "Tie! Score is now {}", score),
        }
    }
}
