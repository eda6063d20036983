//! Study timer, break offers and exercise reminders.
//!
//! Provides the session cycle that drives the widget:
//! - Study countdown with start/stop/reset
//! - Break offer once a study block finishes
//! - Break countdown, ended by hand or by running out
//! - Periodic exercise reminder, independent of the above

pub mod countdown;
pub mod notify;
pub mod reminder;
pub mod scheduler;
pub mod session;

pub use countdown::{
    format_duration, format_mmss, parse_duration, parse_minutes, render_progress_bar, Countdown,
};
pub use notify::{Notice, NoticeQueue, Notifier, TerminalNotifier};
pub use reminder::{ExerciseConfig, ExerciseReminder};
pub use scheduler::{IntervalScheduler, Scheduler, TimerId};
pub use session::{BreakConfig, CycleSettings, CycleSnapshot, SessionCycle, SessionState, TICK};
