//! Terminal front end: raw-mode setup, the event loop and teardown.

pub mod app;
pub mod input;
mod terminal;
pub mod ui;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind, MouseButton, MouseEventKind},
    terminal::enable_raw_mode,
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout};
use tictac_core::{CELL_COUNT, RoundController};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument};

use app::App;
use terminal::TerminalGuard;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const LEFT_CLICK: MouseEventKind = MouseEventKind::Down(MouseButton::Left);

/// Runs the interactive game until the user quits.
pub async fn run_tui(round: RoundController) -> Result<()> {
    info!("Starting tictac TUI");

    enable_raw_mode()?;
    let mut guard = TerminalGuard::new(io::stdout());
    guard.enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let res = run_app(&mut terminal, App::new(round)).await;
    guard.restore()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_app(terminal: &mut Tui, mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(app.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();
    let mut cells = [Rect::default(); CELL_COUNT];

    while !app.should_quit() {
        let snapshot = app.snapshot();
        terminal.draw(|frame| {
            cells = ui::draw(frame, &snapshot, app.cursor(), app.status_message());
        })?;

        tokio::select! {
            now = ticker.tick() => {
                app.tick(now.duration_since(last_tick));
                last_tick = now;
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    debug!(?key, "Key pressed");
                    app.handle_key(key);
                }
                Some(Ok(Event::Mouse(mouse))) if mouse.kind == LEFT_CLICK => {
                    if let Some(index) = input::cell_at(&cells, mouse.column, mouse.row) {
                        debug!(index, "Cell clicked");
                        app.handle_click(index);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    info!("Leaving game loop");
    Ok(())
}
