//! Tic-tac-toe round engine.
//!
//! [`Board`] holds the nine cells and answers rule queries.
//! [`RoundController`] owns the board together with the two players, the
//! shared tie score and a countdown, and advances the round lifecycle in
//! response to [`Command`]s:
//!
//! ```
//! use tictac_core::{MoveOutcome, Players, RoundConfig, RoundController, RoundState};
//!
//! let config = RoundConfig::default().with_seed(Some(1));
//! let mut round = RoundController::new(Players::default(), config);
//! for index in [0, 3, 1, 4] {
//!     round.make_move(index);
//! }
//! assert!(matches!(round.make_move(2), MoveOutcome::Won { .. }));
//! assert_eq!(round.state(), RoundState::RoundWon);
//! ```

#![warn(missing_docs)]

mod action;
mod board;
mod chaos;
mod config;
mod controller;
mod error;
mod position;
pub mod rules;
mod snapshot;
mod timer;
mod types;

pub use action::{Command, MoveOutcome, Outcome, TickOutcome};
pub use board::{Board, CELL_COUNT};
pub use chaos::{ChaosMark, ChaosSeeder, Dice, GameDice};
pub use config::{RoundConfig, TimeoutPolicy};
pub use controller::{RoundController, RoundState};
pub use error::{BoardError, BoardErrorKind, MoveError};
pub use position::Position;
pub use rules::{WIN_LINES, WinLine};
pub use snapshot::RoundSnapshot;
pub use timer::{RoundTimer, TimerEvent};
pub use types::{Cell, Player, Players, Symbol};
