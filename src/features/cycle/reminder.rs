//! Exercise reminder side channel.
//!
//! The reminder keeps its own repeating timer, independent of the study and
//! break countdowns. Changing the interval re-arms it from scratch.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::notify::Notice;
use super::scheduler::{Scheduler, TimerId};

/// Exercise reminder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Minutes between reminders. Must be positive.
    pub interval_minutes: u32,
    /// Text shown with each reminder.
    pub message: String,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            message: "Time to stand up and stretch!".to_string(),
        }
    }
}

/// A periodic exercise reminder.
#[derive(Debug)]
pub struct ExerciseReminder {
    config: ExerciseConfig,
    timer: Option<TimerId>,
    fired: u64,
}

impl ExerciseReminder {
    /// Create an unarmed reminder.
    #[must_use]
    pub const fn new(config: ExerciseConfig) -> Self {
        Self {
            config,
            timer: None,
            fired: 0,
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// Reminder period.
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_secs(u64::from(self.config.interval_minutes) * 60)
    }

    /// Check if the reminder has a live timer.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Check if `id` is this reminder's timer.
    #[must_use]
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Number of reminders delivered.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Arm the timer, replacing any live one.
    pub fn arm<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.disarm(scheduler);
        let id = scheduler.schedule_repeating(self.period());
        tracing::debug!("Exercise reminder armed as {id} every {:?}", self.period());
        self.timer = Some(id);
    }

    /// Cancel the live timer, if any.
    pub fn disarm<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
        }
    }

    /// Change the interval.
    ///
    /// A different positive value cancels the current period and, if the
    /// reminder was armed, starts a fresh one. Returns true if the interval
    /// changed.
    pub fn set_interval<S: Scheduler>(&mut self, minutes: u32, scheduler: &mut S) -> bool {
        if minutes == 0 || minutes == self.config.interval_minutes {
            return false;
        }
        self.config.interval_minutes = minutes;
        if self.is_armed() {
            self.arm(scheduler);
        }
        true
    }

    /// Change the reminder text.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.config.message = message.into();
    }

    /// Record a firing and build its notice.
    pub fn fire(&mut self) -> Notice {
        self.fired += 1;
        Notice::ExerciseReminder {
            message: self.config.message.clone(),
        }
    }
}
