//! Round lifecycle: turns, score, countdown and resets.

use crate::action::{Command, MoveOutcome, Outcome, TickOutcome};
use crate::board::Board;
use crate::chaos::{ChaosMark, ChaosSeeder, Dice, GameDice};
use crate::config::{RoundConfig, TimeoutPolicy};
use crate::error::MoveError;
use crate::rules::WinLine;
use crate::snapshot::RoundSnapshot;
use crate::timer::{RoundTimer, TimerEvent};
use crate::types::{Player, Players, Symbol};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Where the controller is in the round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum RoundState {
    /// Nothing played yet this session. Moves are accepted.
    #[display("Idle")]
    Idle,
    /// Waiting for the current player; countdown running.
    #[display("Awaiting move")]
    AwaitingMove,
    /// A line was completed.
    #[display("Round won")]
    RoundWon,
    /// The board filled up. Passed through on the way to the next round.
    #[display("Round tied")]
    RoundTied,
    /// The countdown ran out.
    #[display("Timed out")]
    TimedOut,
}

impl RoundState {
    /// States in which a move request is processed.
    pub fn accepts_moves(self) -> bool {
        matches!(self, RoundState::Idle | RoundState::AwaitingMove)
    }
}

type TimeoutCallback = Box<dyn FnMut()>;

/// Owns the board, the two players, the score and the countdown.
///
/// All mutation goes through [`make_move`](Self::make_move),
/// [`tick`](Self::tick), [`reset`](Self::reset) or [`handle`](Self::handle).
pub struct RoundController<D = GameDice> {
    board: Board,
    players: Players,
    current: usize,
    state: RoundState,
    score: u32,
    round: u32,
    timer: RoundTimer,
    winning_line: Option<WinLine>,
    seeder: ChaosSeeder<D>,
    config: RoundConfig,
    on_timeout: Option<TimeoutCallback>,
}

impl RoundController<GameDice> {
    /// Creates a controller with dice seeded from the config, or from OS
    /// entropy when no seed is set.
    #[instrument(skip_all)]
    pub fn new(players: Players, config: RoundConfig) -> Self {
        let dice = match config.seed() {
            Some(seed) => GameDice::new(*seed),
            None => GameDice::from_entropy(),
        };
        debug!(seed = dice.seed(), "Chaos dice ready");
        Self::with_dice(players, config, dice)
    }
}

impl<D: Dice> RoundController<D> {
    /// Creates a controller drawing chaos placements from `dice`.
    #[instrument(skip_all, fields(round_secs = config.round_secs(), chaos = config.chaos()))]
    pub fn with_dice(players: Players, config: RoundConfig, dice: D) -> Self {
        info!(
            first = %players.get(0).name(),
            second = %players.get(1).name(),
            "Creating round controller"
        );
        Self {
            board: Board::new(),
            players,
            current: 0,
            state: RoundState::Idle,
            score: 0,
            round: 1,
            timer: RoundTimer::new(config.round_duration()),
            winning_line: None,
            seeder: ChaosSeeder::new(dice, *config.second_mark_after_round()),
            config,
            on_timeout: None,
        }
    }

    /// Registers the callback run when the countdown expires.
    ///
    /// Replaces any previously registered callback.
    pub fn on_timeout(&mut self, callback: impl FnMut() + 'static) {
        self.on_timeout = Some(Box::new(callback));
    }

    /// Starts the first round's countdown. Returns false unless `Idle`.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn start(&mut self) -> bool {
        if self.state != RoundState::Idle {
            return false;
        }
        self.begin_round();
        info!(round = self.round, "Round started");
        true
    }

    /// Places the current player's mark at `index`.
    ///
    /// Invalid requests (occupied cell, index outside 0-8, finished round)
    /// leave everything untouched and return [`MoveOutcome::Ignored`].
    #[doc(alias = "report_move")]
    pub fn make_move(&mut self, index: usize) -> MoveOutcome {
        match self.try_move(index) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(index, error = %e, "Move ignored");
                MoveOutcome::Ignored
            }
        }
    }

    /// Places the current player's mark at `index`, reporting rejections.
    ///
    /// # Errors
    ///
    /// - [`MoveError::RoundOver`] outside `Idle`/`AwaitingMove`
    /// - [`MoveError::InvalidMove`] for an occupied or out-of-range cell
    #[instrument(skip(self), fields(round = self.round, player = self.current))]
    pub fn try_move(&mut self, index: usize) -> Result<MoveOutcome, MoveError> {
        if !self.state.accepts_moves() {
            warn!(state = %self.state, "Move requested after round ended");
            return Err(MoveError::RoundOver(self.state));
        }

        let symbol = self.current_symbol();
        self.board.place(index, symbol)?;
        if self.state == RoundState::Idle {
            self.begin_round();
        }
        debug!(index, %symbol, "Mark placed");

        if let Some(line) = self.board.winning_line() {
            self.state = RoundState::RoundWon;
            self.timer.stop();
            self.winning_line = Some(line);
            info!(
                winner = %self.current_player().name(),
                %symbol,
                line = ?line.indices(),
                "Round won"
            );
            return Ok(MoveOutcome::Won { index, symbol, line });
        }

        if self.board.is_full() {
            self.state = RoundState::RoundTied;
            self.timer.stop();
            self.score += 1;
            info!(score = self.score, round = self.round, "Round tied");
            let chaos = self.next_round_after_tie();
            return Ok(MoveOutcome::Tied {
                index,
                symbol,
                score: self.score,
                chaos,
            });
        }

        self.current = 1 - self.current;
        Ok(MoveOutcome::Placed {
            index,
            symbol,
            next: self.current_symbol(),
        })
    }

    /// Reports `elapsed` time to the countdown.
    ///
    /// On expiry the controller enters `TimedOut` and runs the timeout
    /// callback once. Ticks outside `AwaitingMove` do not advance time.
    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        match self.state {
            RoundState::Idle => TickOutcome::Idle,
            RoundState::AwaitingMove => match self.timer.advance(elapsed) {
                TimerEvent::Running(remaining) => TickOutcome::Running(remaining),
                TimerEvent::Stopped => TickOutcome::Stopped,
                TimerEvent::Expired => {
                    self.expire();
                    TickOutcome::Expired
                }
            },
            RoundState::RoundWon | RoundState::RoundTied | RoundState::TimedOut => {
                TickOutcome::Stopped
            }
        }
    }

    /// Clears the board and starts a new round in `AwaitingMove`.
    ///
    /// Score and the player to move carry over. From `Idle` this only starts
    /// the countdown.
    #[instrument(skip(self), fields(state = %self.state, round = self.round))]
    pub fn reset(&mut self) {
        if self.state != RoundState::Idle {
            self.round += 1;
        }
        self.board.reset();
        self.winning_line = None;
        self.begin_round();
        info!(round = self.round, "Round reset");
    }

    /// Dispatches a [`Command`].
    pub fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::MoveRequested(index) => Outcome::Move(self.make_move(index)),
            Command::Tick(elapsed) => Outcome::Tick(self.tick(elapsed)),
            Command::Reset => {
                self.reset();
                Outcome::Reset
            }
        }
    }

    /// Read model for renderers.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::capture(self)
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Lifecycle state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Both players.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Index (0 or 1) of the player to move.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The player to move.
    pub fn current_player(&self) -> &Player {
        self.players.get(self.current)
    }

    /// Symbol of the player to move.
    pub fn current_symbol(&self) -> Symbol {
        self.current_player().symbol()
    }

    /// Ties so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of the round being played, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Countdown time left.
    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    /// Line completed by the winning move, while `RoundWon`.
    pub fn winning_line(&self) -> Option<WinLine> {
        self.winning_line
    }

    /// Active configuration.
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    fn begin_round(&mut self) {
        self.state = RoundState::AwaitingMove;
        self.timer.start();
    }

    fn next_round_after_tie(&mut self) -> Vec<ChaosMark> {
        self.board.reset();
        let chaos = if *self.config.chaos() {
            self.seeder.reseed(&mut self.board, &self.players, self.round)
        } else {
            Vec::new()
        };
        self.round += 1;
        self.begin_round();
        chaos
    }

    fn expire(&mut self) {
        self.state = RoundState::TimedOut;
        self.timer.stop();
        info!(round = self.round, "Round timed out");
        if let Some(callback) = self.on_timeout.as_mut() {
            callback();
        }
        if *self.config.timeout_policy() == TimeoutPolicy::AutoReset {
            self.reset();
        }
    }
}

impl<D> std::fmt::Debug for RoundController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("board", &self.board)
            .field("players", &self.players)
            .field("current", &self.current)
            .field("state", &self.state)
            .field("score", &self.score)
            .field("round", &self.round)
            .field("timer", &self.timer)
            .field("winning_line", &self.winning_line)
            .field("config", &self.config)
            .field("on_timeout", &self.on_timeout.is_some())
            .finish_non_exhaustive()
    }
}
