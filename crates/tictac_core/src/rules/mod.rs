//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the controller and renderers share one definition of a
//! finished round.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{WIN_LINES, WinLine, winner, winning_line};
