//! Keyboard and mouse mapping onto board cells.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position as ScreenPosition, Rect};
use tictac_core::{CELL_COUNT, Position};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Mark the given cell.
    Place(usize),
    /// Mark the cell under the cursor.
    PlaceAtCursor,
    /// Move the cursor.
    MoveCursor(KeyCode),
    /// Start a new round.
    Reset,
    /// Leave the game.
    Quit,
    /// Key has no binding.
    Nothing,
}

/// Maps a numeric-keypad digit onto a row-major cell index.
///
/// The keypad's top row is `7 8 9`, so `7` is the top-left cell and `3` the
/// bottom-right one.
pub fn keypad_index(digit: char) -> Option<usize> {
    let n = digit.to_digit(10)? as usize;
    if n == 0 {
        return None;
    }
    let row = 2 - (n - 1) / 3;
    let col = (n - 1) % 3;
    Some(row * 3 + col)
}

/// Translates a key press into an action.
pub fn map_key(key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('r') => InputAction::Reset,
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::PlaceAtCursor,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            InputAction::MoveCursor(key.code)
        }
        KeyCode::Char(c) => keypad_index(c).map_or(InputAction::Nothing, InputAction::Place),
        _ => InputAction::Nothing,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };
    target
        .and_then(|(r, c)| Position::from_row_col(r, c))
        .unwrap_or(cursor)
}

/// Finds the cell drawn at a screen coordinate.
pub fn cell_at(cells: &[Rect; CELL_COUNT], column: u16, row: u16) -> Option<usize> {
    let point = ScreenPosition::new(column, row);
    cells.iter().position(|area| area.contains(point))
}
