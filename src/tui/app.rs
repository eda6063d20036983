//! Application state for the TUI.

use std::time::Duration;

use crate::config::{Config, Paths};
use crate::error::StudyError;
use crate::features::cycle::{
    IntervalScheduler, Notice, NoticeQueue, SessionCycle, SessionState,
};
use crate::features::history::HistoryStorage;
use crate::features::todos::{Todo, TodoStorage};
use crate::storage::Database;
use crate::tui::event::Action;

/// Minutes added or removed per `+`/`-`/`]`/`[` press.
pub const STEP_MINUTES: u32 = 5;

/// Application state.
pub struct App {
    /// The running session cycle.
    pub cycle: SessionCycle<IntervalScheduler, NoticeQueue>,
    /// Non-archived todos, open ones first.
    pub todos: Vec<Todo>,
    /// Currently selected todo index.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the key help is shown.
    pub show_help: bool,
    /// Whether the todo pane is shown.
    pub show_todos: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    db: Database,
    paths: Paths,
    config: Config,
    settings_changed: bool,
}

impl App {
    /// Create a new app instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or read.
    pub fn new(paths: Paths, config: Config) -> Result<Self, StudyError> {
        let db = Database::open(&paths)?;
        Self::with_database(paths, config, db)
    }

    /// Create an app over an already open database.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching todos fails.
    pub fn with_database(paths: Paths, config: Config, db: Database) -> Result<Self, StudyError> {
        let cycle = SessionCycle::new(
            config.cycle.to_settings(),
            IntervalScheduler::new(),
            NoticeQueue::new(),
        );
        let todos = TodoStorage::new(&db).list(true)?;

        Ok(Self {
            cycle,
            todos,
            selected: 0,
            status: Some("Press s to start, ? for help".to_string()),
            show_help: false,
            show_todos: config.tui.show_todos,
            should_quit: false,
            db,
            paths,
            config,
            settings_changed: false,
        })
    }

    /// Advance the cycle to `elapsed` since the loop started.
    ///
    /// # Errors
    ///
    /// Returns an error if logging history fails.
    pub fn tick(&mut self, elapsed: Duration) -> Result<(), StudyError> {
        self.cycle.advance_to(elapsed);
        self.drain_notices()
    }

    /// Show pending notices and log them.
    fn drain_notices(&mut self) -> Result<(), StudyError> {
        let notices: Vec<_> = self.cycle.notifier_mut().drain().collect();
        let history = HistoryStorage::new(&self.db);
        for notice in notices {
            history.record_notice(&notice)?;
            self.status = Some(notice.text());
        }
        Ok(())
    }

    /// Apply a key action.
    ///
    /// # Errors
    ///
    /// Returns an error if a todo or history write fails.
    pub fn apply(&mut self, action: Action) -> Result<(), StudyError> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Start => self.cycle_op(SessionCycle::start, "Studying"),
            Action::Stop => self.cycle_op(SessionCycle::stop, "Paused"),
            Action::Reset => {
                self.cycle.reset();
                self.status = Some("Timer reset".to_string());
            }
            Action::AcceptBreak => self.cycle_op(SessionCycle::accept_break, "Enjoy your break"),
            Action::DeclineBreak => self.cycle_op(SessionCycle::decline_break, "Break skipped"),
            Action::EndBreak => self.cycle_op(SessionCycle::end_break, "Break ended"),
            Action::ExerciseLonger => self.adjust_exercise(true),
            Action::ExerciseShorter => self.adjust_exercise(false),
            Action::StudyLonger => self.adjust_study(true),
            Action::StudyShorter => self.adjust_study(false),
            Action::SelectNext => self.select_next(),
            Action::SelectPrevious => self.select_previous(),
            Action::ToggleTodo => self.toggle_selected()?,
            Action::Help => self.show_help = !self.show_help,
        }
        self.drain_notices()
    }

    fn cycle_op(
        &mut self,
        op: fn(&mut SessionCycle<IntervalScheduler, NoticeQueue>) -> bool,
        message: &str,
    ) {
        self.status = Some(if op(&mut self.cycle) {
            message.to_string()
        } else {
            format!("Not available: {}", self.cycle.state().display_name())
        });
    }

    fn adjust_exercise(&mut self, longer: bool) {
        let current = self.cycle.exercise_config().interval_minutes;
        let next = step(current, longer);
        if self.cycle.set_exercise_interval(next) {
            self.config.cycle.exercise_interval_minutes = next;
            self.settings_changed = true;
        }
        self.status = Some(format!("Exercise reminder every {next} min"));
    }

    fn adjust_study(&mut self, longer: bool) {
        if self.cycle.state() != SessionState::Idle {
            self.status = Some("Stop the timer to change the study length".to_string());
            return;
        }
        let next = step(self.cycle.custom_duration_minutes(), longer);
        if self.cycle.set_custom_time(next) {
            self.config.cycle.study_minutes = next;
            self.settings_changed = true;
        }
        self.status = Some(format!("Study blocks are {next} min"));
    }

    /// Reload todos from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching todos fails.
    pub fn refresh(&mut self) -> Result<(), StudyError> {
        self.todos = TodoStorage::new(&self.db).list(true)?;

        // Adjust selection if it's out of bounds
        if !self.todos.is_empty() && self.selected >= self.todos.len() {
            self.selected = self.todos.len() - 1;
        }
        Ok(())
    }

    /// Text for the status bar.
    ///
    /// While a break is on offer the prompt stays visible, with any later
    /// message shown in front of it.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        if self.cycle.state() != SessionState::BreakPending {
            return self.status.clone();
        }

        let offer = Notice::BreakOffered {
            message: self.cycle.break_config().message.clone(),
            break_minutes: self.cycle.break_config().duration_minutes,
            study_seconds: 0,
        }
        .text();
        Some(match self.status.as_deref() {
            Some(status) if status != offer => format!("{status} | {offer}"),
            _ => offer,
        })
    }

    /// Get the currently selected todo.
    #[must_use]
    pub fn selected_todo(&self) -> Option<&Todo> {
        self.todos.get(self.selected)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.todos.len() {
            self.selected += 1;
        }
    }

    /// Toggle the selected todo.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub fn toggle_selected(&mut self) -> Result<(), StudyError> {
        let Some(id) = self.selected_todo().and_then(|t| t.id) else {
            return Ok(());
        };
        let todo = TodoStorage::new(&self.db).toggle(id)?;
        self.status = Some(format!(
            "{}: {}",
            if todo.done { "Done" } else { "Reopened" },
            todo.title
        ));
        self.refresh()
    }

    /// Tear the cycle down and write changed settings back.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn shutdown(&mut self) -> Result<(), StudyError> {
        self.cycle.teardown();
        if self.settings_changed {
            self.paths.ensure_dirs()?;
            self.config.save_to_path(&self.paths.config_file)?;
            self.settings_changed = false;
        }
        Ok(())
    }
}

/// One step up or down. Shortening never goes below one step, and a value
/// already at or under one step stays put.
const fn step(current: u32, longer: bool) -> u32 {
    if longer {
        current.saturating_add(STEP_MINUTES)
    } else if current > STEP_MINUTES {
        current - STEP_MINUTES
    } else {
        current
    }
}
