//! Core domain types for tic-tac-toe.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark placed on the board by one of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Symbol {
    /// The first player's mark.
    #[display("X")]
    X,
    /// The second player's mark.
    #[display("O")]
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Mark(Symbol),
}

impl Cell {
    /// Returns the symbol in this cell, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Mark(symbol) => Some(symbol),
        }
    }

    /// Checks whether the cell is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A named participant holding one symbol for the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Player {
    /// Display name.
    name: String,
    /// Mark this player places.
    symbol: Symbol,
}

impl Player {
    /// Name used when a player leaves the prompt blank.
    pub const UNNAMED: &'static str = "Unnamed";

    /// Creates a player, substituting [`Player::UNNAMED`] for a blank name.
    #[instrument(skip(name))]
    pub fn named(name: impl Into<String>, symbol: Symbol) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            Self::UNNAMED.to_string()
        } else {
            name
        };
        Self::new(name, symbol)
    }

    /// Returns the player's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the player's symbol.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
}

/// The two players of a session, indexed 0 and 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players([Player; 2]);

impl Players {
    /// Pairs two players. Fails when both hold the same symbol.
    #[instrument(skip_all)]
    pub fn new(first: Player, second: Player) -> Option<Self> {
        if first.symbol() == second.symbol() {
            tracing::warn!(symbol = %first.symbol(), "Both players share a symbol");
            return None;
        }
        Some(Self([first, second]))
    }

    /// Pairs an X player and an O player by name.
    pub fn with_names(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self([Player::named(x, Symbol::X), Player::named(o, Symbol::O)])
    }

    /// Returns the player at `index` (0 or 1).
    ///
    /// # Panics
    ///
    /// Panics if `index > 1`; the controller only ever holds 0 or 1.
    pub fn get(&self, index: usize) -> &Player {
        &self.0[index]
    }

    /// Returns the index of the player holding `symbol`.
    pub fn index_of(&self, symbol: Symbol) -> usize {
        if self.0[0].symbol() == symbol { 0 } else { 1 }
    }

    /// Iterates both players in order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.0.iter()
    }
}

impl Default for Players {
    fn default() -> Self {
        Self::with_names("", "")
    }
}
