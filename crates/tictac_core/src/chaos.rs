//! Random marks dropped onto the board after a tie.
//!
//! After a tied round the fresh board receives one mark for a coin-flip
//! chosen player. Once the round number passes a threshold, a second mark is
//! placed for the other player. A second index that lands on the first is
//! shifted by `(index + roll(6)) % 8`. The shift can land on the first index
//! again (or never reach cell 8); such a mark is refused by the board and
//! skipped.

use crate::board::{Board, CELL_COUNT};
use crate::types::{Players, Symbol};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Source of randomness for chaos placements.
pub trait Dice {
    /// Fair coin.
    fn coin_flip(&mut self) -> bool;

    /// Uniform value in `0..upper`. `upper` is never zero.
    fn roll(&mut self, upper: usize) -> usize;
}

/// Deterministic ChaCha8-backed dice.
#[derive(Debug, Clone)]
pub struct GameDice {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameDice {
    /// Creates dice with the given seed. Same seed, same rolls.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates dice seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().r#gen())
    }

    /// Seed these dice were created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for GameDice {
    fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    fn roll(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}

/// One mark placed by the seeder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosMark {
    /// Cell that received the mark.
    pub index: usize,
    /// Symbol placed.
    pub symbol: Symbol,
}

/// Span of the collision shift roll.
const SHIFT_SPAN: usize = 6;

/// Modulus of the collision shift.
const SHIFT_MODULUS: usize = 8;

/// Post-tie re-seeding policy.
#[derive(Debug, Clone)]
pub struct ChaosSeeder<D> {
    dice: D,
    second_mark_after_round: u32,
}

impl<D: Dice> ChaosSeeder<D> {
    /// Creates a seeder; rounds numbered above `second_mark_after_round`
    /// receive a second mark.
    pub fn new(dice: D, second_mark_after_round: u32) -> Self {
        Self {
            dice,
            second_mark_after_round,
        }
    }

    /// Drops chaos marks onto a freshly cleared `board`.
    ///
    /// `round` is the number of the round that just tied. Returns the marks
    /// actually placed.
    #[instrument(skip(self, board, players))]
    pub fn reseed(&mut self, board: &mut Board, players: &Players, round: u32) -> Vec<ChaosMark> {
        let mut placed = Vec::with_capacity(2);

        let first_player = if self.dice.coin_flip() { 0 } else { 1 };
        let first_symbol = players.get(first_player).symbol();
        let first = self.dice.roll(CELL_COUNT);
        match board.place(first, first_symbol) {
            Ok(()) => placed.push(ChaosMark {
                index: first,
                symbol: first_symbol,
            }),
            Err(e) => warn!(index = first, error = %e, "First chaos mark refused"),
        }

        if round > self.second_mark_after_round {
            let second_symbol = first_symbol.other();
            let mut second = self.dice.roll(CELL_COUNT);
            if second == first {
                let shifted = (second + self.dice.roll(SHIFT_SPAN)) % SHIFT_MODULUS;
                debug!(from = second, to = shifted, "Second chaos mark collided, shifting");
                second = shifted;
            }
            match board.place(second, second_symbol) {
                Ok(()) => placed.push(ChaosMark {
                    index: second,
                    symbol: second_symbol,
                }),
                Err(e) => warn!(index = second, error = %e, "Second chaos mark refused"),
            }
        }

        info!(round, marks = ?placed, "Board re-seeded after tie");
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;
    use std::collections::VecDeque;

    /// Dice that replay a fixed script.
    struct ScriptedDice {
        coins: VecDeque<bool>,
        rolls: VecDeque<usize>,
    }

    impl ScriptedDice {
        fn new(coins: &[bool], rolls: &[usize]) -> Self {
            Self {
                coins: coins.iter().copied().collect(),
                rolls: rolls.iter().copied().collect(),
            }
        }
    }

    impl Dice for ScriptedDice {
        fn coin_flip(&mut self) -> bool {
            self.coins.pop_front().expect("script ran out of coins")
        }

        fn roll(&mut self, upper: usize) -> usize {
            let value = self.rolls.pop_front().expect("script ran out of rolls");
            assert!(value < upper, "scripted roll {value} outside 0..{upper}");
            value
        }
    }

    fn players() -> Players {
        Players::new(Player::named("Ann", Symbol::X), Player::named("Bo", Symbol::O)).unwrap()
    }

    #[test]
    fn test_early_rounds_get_one_mark() {
        let mut seeder = ChaosSeeder::new(ScriptedDice::new(&[true], &[5]), 2);
        let mut board = Board::new();

        let marks = seeder.reseed(&mut board, &players(), 2);

        assert_eq!(marks, vec![ChaosMark { index: 5, symbol: Symbol::X }]);
        assert_eq!(board.empty_indices().len(), 8);
    }

    #[test]
    fn test_coin_flip_picks_second_player() {
        let mut seeder = ChaosSeeder::new(ScriptedDice::new(&[false], &[0]), 2);
        let mut board = Board::new();

        let marks = seeder.reseed(&mut board, &players(), 1);

        assert_eq!(marks[0].symbol, Symbol::O);
    }

    #[test]
    fn test_later_rounds_get_a_mark_for_each_player() {
        let mut seeder = ChaosSeeder::new(ScriptedDice::new(&[true], &[1, 7]), 2);
        let mut board = Board::new();

        let marks = seeder.reseed(&mut board, &players(), 3);

        assert_eq!(
            marks,
            vec![
                ChaosMark { index: 1, symbol: Symbol::X },
                ChaosMark { index: 7, symbol: Symbol::O },
            ]
        );
    }

    #[test]
    fn test_collision_is_shifted_modulo_eight() {
        // Both rolls hit 6; shift by 4 gives (6 + 4) % 8 = 2.
        let mut seeder = ChaosSeeder::new(ScriptedDice::new(&[true], &[6, 6, 4]), 2);
        let mut board = Board::new();

        let marks = seeder.reseed(&mut board, &players(), 3);

        assert_eq!(marks[1], ChaosMark { index: 2, symbol: Symbol::O });
    }

    #[test]
    fn test_shift_that_collides_again_skips_second_mark() {
        // Shift of 0 keeps the colliding index.
        let mut seeder = ChaosSeeder::new(ScriptedDice::new(&[false], &[3, 3, 0]), 2);
        let mut board = Board::new();

        let marks = seeder.reseed(&mut board, &players(), 4);

        assert_eq!(marks, vec![ChaosMark { index: 3, symbol: Symbol::O }]);
        assert_eq!(board.empty_indices().len(), 8);
    }

    #[test]
    fn test_collision_on_cell_eight_wraps_to_low_cells() {
        let mut seeder = ChaosSeeder::new(ScriptedDice::new(&[true], &[8, 8, 5]), 2);
        let mut board = Board::new();

        let marks = seeder.reseed(&mut board, &players(), 3);

        assert_eq!(marks[1].index, (8 + 5) % 8);
    }

    #[test]
    fn test_game_dice_are_deterministic_per_seed() {
        let mut a = GameDice::new(42);
        let mut b = GameDice::new(42);
        let rolls_a: Vec<_> = (0..16).map(|_| a.roll(9)).collect();
        let rolls_b: Vec<_> = (0..16).map(|_| b.roll(9)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|&r| r < 9));
    }
}
