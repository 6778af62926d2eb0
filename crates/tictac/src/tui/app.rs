//! Application state and logic.

use super::input::{self, InputAction};
use crossterm::event::KeyEvent;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tictac_core::{
    Command, MoveOutcome, Outcome, Position, RoundController, RoundSnapshot, TickOutcome,
};
use tracing::{debug, info};

/// Main application state.
pub struct App {
    round: RoundController,
    cursor: Position,
    status_message: String,
    timed_out: Rc<Cell<bool>>,
    should_quit: bool,
}

impl App {
    /// Wraps a controller and registers the timeout hook.
    pub fn new(mut round: RoundController) -> Self {
        let timed_out = Rc::new(Cell::new(false));
        let flag = Rc::clone(&timed_out);
        round.on_timeout(move || flag.set(true));

        let status_message = format!(
            "{} ({}) starts. The clock runs from the first move.",
            round.current_player().name(),
            round.current_symbol()
        );
        Self {
            round,
            cursor: Position::Center,
            status_message,
            timed_out,
            should_quit: false,
        }
    }

    /// Read model for the renderer.
    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot()
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// How often the event loop should tick.
    pub fn tick_interval(&self) -> Duration {
        self.round.config().tick_interval()
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match input::map_key(key) {
            InputAction::Place(index) => {
                self.cursor = Position::from_index(index).unwrap_or(self.cursor);
                self.dispatch(Command::MoveRequested(index));
            }
            InputAction::PlaceAtCursor => {
                self.dispatch(Command::MoveRequested(self.cursor.to_index()));
            }
            InputAction::MoveCursor(code) => {
                self.cursor = input::move_cursor(self.cursor, code);
            }
            InputAction::Reset => self.dispatch(Command::Reset),
            InputAction::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            InputAction::Nothing => {}
        }
    }

    /// Handles a click on the cell at `index`.
    pub fn handle_click(&mut self, index: usize) {
        if let Some(position) = Position::from_index(index) {
            self.cursor = position;
        }
        self.dispatch(Command::MoveRequested(index));
    }

    /// Reports elapsed time to the round.
    pub fn tick(&mut self, elapsed: Duration) {
        self.dispatch(Command::Tick(elapsed));
    }

    fn dispatch(&mut self, command: Command) {
        let outcome = self.round.handle(command);
        if !matches!(outcome, Outcome::Tick(_)) {
            debug!(?command, ?outcome, "Command handled");
        }

        match outcome {
            Outcome::Move(MoveOutcome::Ignored) => {
                if self.round.state().accepts_moves() {
                    self.status_message = "That cell is taken.".to_string();
                }
            }
            Outcome::Move(MoveOutcome::Placed { .. }) => self.announce_turn(),
            Outcome::Move(MoveOutcome::Won { symbol, .. }) => {
                let players = self.round.players();
                let winner = players.get(players.index_of(symbol)).name();
                self.status_message =
                    format!("Game over! {} wins! Press 'r' for a new round.", winner);
            }
            Outcome::Move(MoveOutcome::Tied { score, chaos, .. }) => {
                self.status_message = match chaos.len() {
                    0 => format!("Tie! Score {}. New round.", score),
                    n => format!("Tie! Score {}. Chaos dropped {} mark(s).", score, n),
                };
            }
            Outcome::Tick(TickOutcome::Expired) => {
                if self.timed_out.replace(false) {
                    self.status_message = "Time's up! Press 'r' for a new round.".to_string();
                }
            }
            Outcome::Tick(_) => {}
            Outcome::Reset => {
                self.timed_out.set(false);
                self.announce_turn();
            }
        }
    }

    fn announce_turn(&mut self) {
        self.status_message = format!(
            "{} ({}) to move.",
            self.round.current_player().name(),
            self.round.current_symbol()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tictac_core::{Players, RoundConfig, RoundState, TimeoutPolicy};

    fn app(config: RoundConfig) -> App {
        let config = config.with_seed(Some(5));
        App::new(RoundController::new(Players::with_names("Ann", "Bo"), config))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_keypad_places_marks() {
        let mut app = app(RoundConfig::default());
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.snapshot().board[0], Some(tictac_core::Symbol::X));
        assert_eq!(app.cursor(), Position::TopLeft);
        assert_eq!(app.status_message(), "Bo (O) to move.");
    }

    #[test]
    fn test_cursor_and_enter_place_marks() {
        let mut app = app(RoundConfig::default());
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.snapshot().board[1], Some(tictac_core::Symbol::X));
    }

    #[test]
    fn test_win_by_clicks_announces_winner() {
        let mut app = app(RoundConfig::default());
        for index in [0, 3, 1, 4, 2] {
            app.handle_click(index);
        }
        assert_eq!(app.snapshot().state, RoundState::RoundWon);
        assert!(app.status_message().contains("Ann wins"));
    }

    #[test]
    fn test_timeout_flag_updates_status() {
        let mut app = app(RoundConfig::default().with_round_secs(1));
        app.handle_click(4);
        app.tick(Duration::from_secs(2));
        assert_eq!(app.snapshot().state, RoundState::TimedOut);
        assert!(app.status_message().starts_with("Time's up"));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.snapshot().state, RoundState::AwaitingMove);
        assert_eq!(app.snapshot().round, 2);
    }

    #[test]
    fn test_auto_reset_still_reports_timeout() {
        let config = RoundConfig::default()
            .with_round_secs(1)
            .with_timeout_policy(TimeoutPolicy::AutoReset);
        let mut app = app(config);
        app.handle_click(4);
        app.tick(Duration::from_secs(1));
        assert!(app.status_message().starts_with("Time's up"));
        assert_eq!(app.snapshot().state, RoundState::AwaitingMove);
    }

    #[test]
    fn test_quit() {
        let mut app = app(RoundConfig::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
