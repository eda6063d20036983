//! Todo item type.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// A todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// What needs doing
    pub title: String,
    /// Whether the todo is finished
    pub done: bool,
    /// Hidden from the list once archived
    pub archived: bool,
    /// When the todo was added
    pub created_at: DateTime<Utc>,
    /// When the todo was finished
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create an open todo.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::InvalidInput` if the title is blank.
    pub fn new(title: &str) -> Result<Self, StudyError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StudyError::InvalidInput(
                "Todo title must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id: None,
            title: title.to_string(),
            done: false,
            archived: false,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    /// Mark the todo finished.
    pub fn complete(&mut self) {
        if !self.done {
            self.done = true;
            self.completed_at = Some(Utc::now());
        }
    }

    /// Mark the todo open again.
    pub fn reopen(&mut self) {
        self.done = false;
        self.completed_at = None;
    }

    /// Flip between open and finished.
    pub fn toggle(&mut self) {
        if self.done {
            self.reopen();
        } else {
            self.complete();
        }
    }

    /// Creation time in local timezone.
    #[must_use]
    pub fn created_at_local(&self) -> DateTime<Local> {
        self.created_at.with_timezone(&Local)
    }

    /// Checkbox marker for list output.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        if self.done {
            "[x]"
        } else {
            "[ ]"
        }
    }
}
