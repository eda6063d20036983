//! Terminal User Interface (TUI) for studydesk.
//!
//! Shows the study countdown, a progress gauge and the todo list, and maps
//! single keys onto the session cycle. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::{map_key, Action};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::{Config, Paths};
use crate::error::StudyError;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run, or if changed
/// settings cannot be saved on exit.
pub fn run(paths: &Paths, config: Config) -> Result<(), StudyError> {
    let _guard = suppress_logging();
    let tick = Duration::from_millis(config.tui.tick_millis.max(10));
    let mut app = App::new(paths.clone(), config)?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| StudyError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StudyError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StudyError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    let saved = app.shutdown();
    result.and(saved)
}

/// Run the main application loop.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<(), StudyError> {
    let origin = Instant::now();

    while !app.should_quit {
        app.tick(origin.elapsed())?;

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StudyError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::poll_action(tick)? {
            app.apply(action)?;
        }
    }

    Ok(())
}

/// Swap in a subscriber that drops every event, so log lines never land on
/// the alternate screen. The previous subscriber is restored when the guard
/// is dropped.
fn suppress_logging() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::layer::SubscriberExt;

    let noop_subscriber =
        tracing_subscriber::registry().with(tracing_subscriber::filter::LevelFilter::OFF);

    tracing::subscriber::set_default(noop_subscriber)
}
