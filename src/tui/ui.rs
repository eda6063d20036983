//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::features::cycle::SessionState;
use crate::tui::app::App;

const HELP: &[(&str, &str)] = &[
    ("s / p", "start / stop studying"),
    ("r", "reset the timer"),
    ("y / n", "accept / decline the break"),
    ("e", "end the break early"),
    ("+ / -", "exercise reminder +/- 5 min"),
    ("] / [", "study block +/- 5 min (when idle)"),
    ("j / k", "select todo"),
    ("x", "toggle todo done"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, gauge, todos, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header
            Constraint::Length(3), // Gauge
            Constraint::Min(0),    // Todos
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_gauge(frame, app, chunks[1]);
    if app.show_todos {
        render_todos(frame, app, chunks[2]);
    }
    render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        let area = frame.area();
        render_help(frame, area);
    }
}

const fn state_color(state: SessionState) -> Color {
    match state {
        SessionState::Idle => Color::White,
        SessionState::Running => Color::Green,
        SessionState::BreakPending => Color::Yellow,
        SessionState::OnBreak => Color::Cyan,
    }
}

/// Render the state and the big countdown.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let state = app.cycle.state();
    let color = state_color(state);
    let exercise = app.cycle.exercise_config().interval_minutes;

    let lines = vec![
        Line::from(Span::styled(
            state.display_name(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.cycle.display_time(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} min study · {} min break · stretch every {exercise} min",
                app.cycle.custom_duration_minutes(),
                app.cycle.break_config().duration_minutes
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" studydesk ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Render the progress gauge.
fn render_gauge(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let progress = app.cycle.progress().clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(state_color(app.cycle.state())))
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));

    frame.render_widget(gauge, area);
}

/// Render the todo list.
fn render_todos(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .todos
        .iter()
        .map(|todo| {
            let marker_style = Style::default().fg(if todo.done {
                Color::Green
            } else {
                Color::White
            });
            let title_style = if todo.done {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", todo.marker()), marker_style),
                Span::styled(todo.title.as_str(), title_style),
            ]))
        })
        .collect();

    let open = app.todos.iter().filter(|t| !t.done).count();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Todos ({open} open) "))
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    // Create list state for scrolling
    let mut state = ListState::default();
    if !app.todos.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app.status_line().unwrap_or_else(|| {
        "s:start | p:stop | y/n:break | e:end break | x:toggle | ?:help | q:quit".to_string()
    });

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::Yellow));

    frame.render_widget(status, area);
}

/// Render the key help as a centered popup.
fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let height = u16::try_from(HELP.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered(area, 48, height);

    let lines: Vec<Line<'_>> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{keys:>7}  "),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*what),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Paths};
    use crate::storage::Database;
    use crate::tui::event::Action;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn app() -> App {
        let paths = Paths::with_root(std::env::temp_dir().join("studydesk-ui-test"));
        App::with_database(paths, Config::default(), Database::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_render_idle() {
        let app = app();
        let text = screen(&app);
        assert!(text.contains("Idle"));
        assert!(text.contains("50:00"));
        assert!(text.contains("Todos (0 open)"));
    }

    #[test]
    fn test_render_help_popup() {
        let mut app = app();
        app.apply(Action::Help).unwrap();
        let text = screen(&app);
        assert!(text.contains("Keys"));
        assert!(text.contains("end the break early"));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered(area, 48, 12);
        assert_eq!(popup, area);
    }
}
