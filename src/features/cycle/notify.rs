//! Notifications raised by the session cycle.

use std::collections::VecDeque;
use std::io::Write;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::countdown::format_mmss;

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The study countdown reached zero and a break is on offer.
    BreakOffered {
        /// Configured break message.
        message: String,
        /// Length of the offered break.
        break_minutes: u32,
        /// Length of the study block just finished.
        study_seconds: u64,
    },
    /// The break was ended by hand.
    BreakSkipped {
        /// Break time actually taken.
        elapsed_seconds: u64,
    },
    /// The break countdown ran out.
    BreakEnded {
        /// Break time actually taken.
        elapsed_seconds: u64,
    },
    /// Periodic exercise reminder.
    ExerciseReminder {
        /// Configured exercise message.
        message: String,
    },
}

impl Notice {
    /// One-line text for toasts and terminal output.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::BreakOffered {
                message,
                break_minutes,
                ..
            } => format!("{message} Take a {break_minutes} minute break? (y/n)"),
            Self::BreakSkipped { elapsed_seconds } => {
                format!("Break skipped after {}. Back to work!", format_mmss(*elapsed_seconds))
            }
            Self::BreakEnded { .. } => "Break is over. Back to work!".to_string(),
            Self::ExerciseReminder { message } => message.clone(),
        }
    }
}

/// Receiver of cycle notices.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Deliver a notice. Must not call back into the cycle.
    fn notify(&mut self, notice: &Notice);
}

/// Buffers notices until the UI drains them.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notice, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Notice> + '_ {
        self.pending.drain(..)
    }

    /// Number of buffered notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for NoticeQueue {
    fn notify(&mut self, notice: &Notice) {
        self.pending.push_back(notice.clone());
    }
}

/// Prints notices to a writer, ringing the terminal bell.
pub struct TerminalNotifier<W: Write> {
    out: W,
    bell: bool,
    delivered: Vec<Notice>,
}

impl TerminalNotifier<std::io::Stdout> {
    /// Notifier writing to stdout.
    #[must_use]
    pub fn stdout(bell: bool) -> Self {
        Self::new(std::io::stdout(), bell)
    }
}

impl<W: Write> TerminalNotifier<W> {
    /// Notifier writing to `out`.
    pub fn new(out: W, bell: bool) -> Self {
        Self {
            out,
            bell,
            delivered: Vec::new(),
        }
    }

    /// Take the notices printed since the last call.
    pub fn take_delivered(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.delivered)
    }

    /// Consume the notifier, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalNotifier<W> {
    fn notify(&mut self, notice: &Notice) {
        let icon = match notice {
            Notice::BreakOffered { .. } => "⏰",
            Notice::BreakSkipped { .. } | Notice::BreakEnded { .. } => "📚",
            Notice::ExerciseReminder { .. } => "🤸",
        };
        let bell = if self.bell { "\x07" } else { "" };
        let line = format!("\r{icon} {}{bell}", notice.text().yellow());

        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!("Failed to print notice: {e}");
        }
        self.delivered.push(notice.clone());
    }
}
