//! Terminal tic-tac-toe with a round countdown and chaos marks after ties.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod simulate;
pub mod tui;
