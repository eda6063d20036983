//! History entry type.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::features::cycle::Notice;

/// What a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A finished study block
    Study,
    /// A finished break
    Break,
}

impl EntryKind {
    /// Database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Break => "break",
        }
    }

    /// Parse the database representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "study" => Some(Self::Study),
            "break" => Some(Self::Break),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Study => write!(f, "Study"),
            Self::Break => write!(f, "Break"),
        }
    }
}

/// One logged study block or break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// Study block or break
    pub kind: EntryKind,
    /// Time actually spent
    pub seconds: u64,
    /// Break ended by hand before running out
    pub skipped: bool,
    /// When it finished
    pub finished_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an unsaved entry finishing now.
    #[must_use]
    pub fn new(kind: EntryKind, seconds: u64, skipped: bool) -> Self {
        Self {
            id: None,
            kind,
            seconds,
            skipped,
            finished_at: Utc::now(),
        }
    }

    /// The entry a cycle notice stands for, if any.
    ///
    /// A break offer means a study block just finished; a skipped or ended
    /// break means a break finished. Exercise reminders are not logged.
    #[must_use]
    pub fn from_notice(notice: &Notice) -> Option<Self> {
        match notice {
            Notice::BreakOffered { study_seconds, .. } => {
                Some(Self::new(EntryKind::Study, *study_seconds, false))
            }
            Notice::BreakSkipped { elapsed_seconds } => {
                Some(Self::new(EntryKind::Break, *elapsed_seconds, true))
            }
            Notice::BreakEnded { elapsed_seconds } => {
                Some(Self::new(EntryKind::Break, *elapsed_seconds, false))
            }
            Notice::ExerciseReminder { .. } => None,
        }
    }

    /// Finish time in local timezone.
    #[must_use]
    pub fn finished_at_local(&self) -> DateTime<Local> {
        self.finished_at.with_timezone(&Local)
    }
}
