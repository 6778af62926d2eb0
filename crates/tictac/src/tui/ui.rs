//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictac_core::{CELL_COUNT, Position, RoundSnapshot, Symbol};

const CELL_WIDTH: u16 = 12;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

const HELP: &str = "keypad 1-9 / arrows + enter / click to mark   r: new round   q: quit";

/// Countdown at or below this many seconds is drawn in red.
const LOW_TIME_SECS: u64 = 5;

/// Draws the whole screen and returns where each cell ended up, for mouse
/// hit-testing.
pub fn draw(
    frame: &mut Frame,
    snapshot: &RoundSnapshot,
    cursor: Position,
    status: &str,
) -> [Rect; CELL_COUNT] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Title
            Constraint::Length(3),            // Score, timer, next symbol
            Constraint::Min(BOARD_HEIGHT),    // Board
            Constraint::Length(3),            // Status
            Constraint::Length(1),            // Key help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    frame.render_widget(hud(snapshot), chunks[1]);

    let cells = board_layout(chunks[2]);
    for (index, area) in cells.iter().enumerate() {
        draw_cell(frame, *area, snapshot, cursor, index);
    }
    draw_grid_lines(frame, &cells);

    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);

    cells
}

/// Cell rectangles for a board centered in `area`, row-major.
pub fn board_layout(area: Rect) -> [Rect; CELL_COUNT] {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    let mut cells = [Rect::default(); CELL_COUNT];
    for row in 0..3 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(rows[row * 2]);
        for col in 0..3 {
            cells[row * 3 + col] = cols[col * 2];
        }
    }
    cells
}

fn hud(snapshot: &RoundSnapshot) -> Paragraph<'static> {
    let timer_style = if snapshot.remaining_secs <= LOW_TIME_SECS {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let separator = Span::styled("  │  ", Style::default().fg(Color::DarkGray));

    let line = Line::from(vec![
        Span::raw(format!("Score: {}", snapshot.score)),
        separator.clone(),
        Span::raw(format!("Round: {}", snapshot.round)),
        separator.clone(),
        Span::styled(format!("Time: {}s", snapshot.remaining_secs), timer_style),
        separator,
        Span::raw("Next: "),
        Span::styled(
            snapshot.current_symbol.to_string(),
            symbol_style(snapshot.current_symbol),
        ),
        Span::raw(format!(" ({})", snapshot.current_player)),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RoundSnapshot,
    cursor: Position,
    index: usize,
) {
    let (text, base_style) = match snapshot.board[index] {
        Some(symbol) => (symbol.to_string(), symbol_style(symbol)),
        None => (keypad_label(index), Style::default().fg(Color::DarkGray)),
    };

    let on_winning_line = snapshot
        .winning_line
        .is_some_and(|line| line.contains(&index));

    let style = if on_winning_line {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if index == cursor.to_index() && snapshot.state.accepts_moves() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::raw(text)),
        Line::default(),
    ])
    .style(style)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_grid_lines(frame: &mut Frame, cells: &[Rect; CELL_COUNT]) {
    let grid = Style::default().fg(Color::DarkGray);
    for row in 0..2 {
        let above = cells[row * 3];
        let area = Rect::new(above.x, above.y + above.height, BOARD_WIDTH, 1);
        let line = "─".repeat(usize::from(BOARD_WIDTH));
        frame.render_widget(Paragraph::new(line).style(grid), area.intersection(frame.area()));
    }
    for col in 0..2 {
        let left = cells[col];
        let area = Rect::new(left.x + left.width, left.y, 1, BOARD_HEIGHT);
        let lines: Vec<Line> = (0..BOARD_HEIGHT).map(|_| Line::from("│")).collect();
        frame.render_widget(Paragraph::new(lines).style(grid), area.intersection(frame.area()));
    }
}

fn symbol_style(symbol: Symbol) -> Style {
    let color = match symbol {
        Symbol::X => Color::Blue,
        Symbol::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Keypad digit that marks the cell at `index`.
fn keypad_label(index: usize) -> String {
    let (row, col) = (index / 3, index % 3);
    ((2 - row) * 3 + col + 1).to_string()
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::keypad_index;
    use ratatui::{Terminal, backend::TestBackend};
    use tictac_core::RoundState;

    fn snapshot() -> RoundSnapshot {
        let mut board = [None; CELL_COUNT];
        board[0] = Some(Symbol::X);
        board[4] = Some(Symbol::X);
        board[8] = Some(Symbol::X);
        board[2] = Some(Symbol::O);
        RoundSnapshot {
            board,
            state: RoundState::RoundWon,
            current_player: "Ann".to_string(),
            current_symbol: Symbol::X,
            score: 2,
            round: 3,
            remaining_secs: 17,
            winning_line: Some([0, 4, 8]),
        }
    }

    #[test]
    fn test_keypad_labels_match_input_mapping() {
        for index in 0..CELL_COUNT {
            let label = keypad_label(index).chars().next().unwrap();
            assert_eq!(keypad_index(label), Some(index));
        }
    }

    #[test]
    fn test_board_layout_cells_are_disjoint_and_ordered() {
        let cells = board_layout(Rect::new(0, 0, 80, 20));
        for row in 0..3 {
            for col in 0..2 {
                assert!(cells[row * 3 + col].x < cells[row * 3 + col + 1].x);
            }
        }
        assert!(cells[0].y < cells[3].y && cells[3].y < cells[6].y);
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }

    #[test]
    fn test_draw_renders_hud_and_status() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut cells = [Rect::default(); CELL_COUNT];
        terminal
            .draw(|frame| {
                cells = draw(frame, &snapshot(), Position::Center, "Ann wins!");
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Score: 2"));
        assert!(text.contains("Time: 17s"));
        assert!(text.contains("Ann wins!"));
        assert!(cells.iter().all(|cell| cell.width == CELL_WIDTH));
    }
}
