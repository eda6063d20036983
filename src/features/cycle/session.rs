//! The study / break / exercise session cycle.
//!
//! A single [`SessionState`] drives two countdowns. The study countdown runs
//! only while `Running`; the break countdown only while `OnBreak`. Each has
//! an owned timer handle that is cancelled on every transition away from the
//! state that armed it. The exercise reminder runs alongside, whatever the
//! state.
//!
//! Operations called from a state where they do not apply return `false` and
//! change nothing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::countdown::Countdown;
use super::notify::{Notice, Notifier};
use super::reminder::{ExerciseConfig, ExerciseReminder};
use super::scheduler::{Scheduler, TimerId};

/// Countdown tick period.
pub const TICK: Duration = Duration::from_secs(1);

/// Study block length used when nothing else is configured.
pub const DEFAULT_STUDY_MINUTES: u32 = 50;

/// Where the cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the user to start studying.
    #[default]
    Idle,
    /// Study countdown is running.
    Running,
    /// Study block finished; a break is on offer.
    BreakPending,
    /// Break countdown is running.
    OnBreak,
}

impl SessionState {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Studying",
            Self::BreakPending => "Break offered",
            Self::OnBreak => "On break",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Break settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakConfig {
    /// Break length in minutes. Must be positive.
    pub duration_minutes: u32,
    /// Text shown with the break offer.
    pub message: String,
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self {
            duration_minutes: 10,
            message: "Great work! Time for a break.".to_string(),
        }
    }
}

/// Everything needed to build a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSettings {
    /// Study block length in minutes.
    pub custom_duration_minutes: u32,
    /// Break settings.
    pub break_config: BreakConfig,
    /// Exercise reminder settings.
    pub exercise: ExerciseConfig,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            custom_duration_minutes: DEFAULT_STUDY_MINUTES,
            break_config: BreakConfig::default(),
            exercise: ExerciseConfig::default(),
        }
    }
}

/// Read-only view of the cycle for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    /// Current state.
    pub state: SessionState,
    /// Study seconds left.
    pub remaining_study_seconds: u64,
    /// Break seconds left.
    pub remaining_break_seconds: u64,
    /// Study block length in minutes.
    pub custom_duration_minutes: u32,
    /// Break length in minutes.
    pub break_minutes: u32,
    /// Minutes between exercise reminders.
    pub exercise_interval_minutes: u32,
}

/// The session cycle state machine.
pub struct SessionCycle<S: Scheduler, N: Notifier> {
    state: SessionState,
    custom_duration_minutes: u32,
    study: Countdown,
    break_countdown: Countdown,
    break_config: BreakConfig,
    reminder: ExerciseReminder,
    study_timer: Option<TimerId>,
    break_timer: Option<TimerId>,
    torn_down: bool,
    scheduler: S,
    notifier: N,
}

impl<S: Scheduler, N: Notifier> SessionCycle<S, N> {
    /// Build an idle cycle and arm the exercise reminder.
    ///
    /// Zero lengths fall back to their defaults: [`DEFAULT_STUDY_MINUTES`],
    /// the default break length and the default exercise interval.
    pub fn new(settings: CycleSettings, scheduler: S, notifier: N) -> Self {
        let custom_duration_minutes = if settings.custom_duration_minutes == 0 {
            DEFAULT_STUDY_MINUTES
        } else {
            settings.custom_duration_minutes
        };
        let mut break_config = settings.break_config;
        if break_config.duration_minutes == 0 {
            break_config.duration_minutes = BreakConfig::default().duration_minutes;
        }
        let mut exercise = settings.exercise;
        if exercise.interval_minutes == 0 {
            exercise.interval_minutes = ExerciseConfig::default().interval_minutes;
        }

        let mut cycle = Self {
            state: SessionState::Idle,
            custom_duration_minutes,
            study: Countdown::from_minutes(custom_duration_minutes),
            break_countdown: Countdown::default(),
            break_config,
            reminder: ExerciseReminder::new(exercise),
            study_timer: None,
            break_timer: None,
            torn_down: false,
            scheduler,
            notifier,
        };
        cycle.reminder.arm(&mut cycle.scheduler);
        cycle
    }

    /// Start studying. Only valid from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.torn_down || self.state != SessionState::Idle || self.study.is_finished() {
            debug!("start() ignored in state {:?}", self.state);
            return false;
        }
        debug_assert!(self.break_timer.is_none());

        self.study_timer = Some(self.scheduler.schedule_repeating(TICK));
        self.state = SessionState::Running;
        debug!("Study started with {}s remaining", self.study.remaining_seconds());
        true
    }

    /// Pause studying, keeping the remaining time. Only valid from `Running`.
    pub fn stop(&mut self) -> bool {
        if self.state != SessionState::Running {
            debug!("stop() ignored in state {:?}", self.state);
            return false;
        }

        self.cancel_study_timer();
        self.state = SessionState::Idle;
        debug!("Study stopped with {}s remaining", self.study.remaining_seconds());
        true
    }

    /// Cancel any countdown and go back to a full, idle study block.
    pub fn reset(&mut self) {
        self.cancel_study_timer();
        self.cancel_break_timer();
        self.study = Countdown::from_minutes(self.custom_duration_minutes);
        self.break_countdown = Countdown::default();
        self.state = SessionState::Idle;
        debug!("Cycle reset to {} minutes", self.custom_duration_minutes);
    }

    /// Store a new study block length.
    ///
    /// Takes effect at the next reset. Zero is ignored.
    pub fn set_custom_duration(&mut self, minutes: u32) -> bool {
        if minutes == 0 {
            return false;
        }
        self.custom_duration_minutes = minutes;
        true
    }

    /// Store a new study block length and reset to it.
    pub fn set_custom_time(&mut self, minutes: u32) -> bool {
        if !self.set_custom_duration(minutes) {
            return false;
        }
        self.reset();
        true
    }

    /// Take the offered break. Only valid from `BreakPending`.
    pub fn accept_break(&mut self) -> bool {
        if self.state != SessionState::BreakPending {
            debug!("accept_break() ignored in state {:?}", self.state);
            return false;
        }
        debug_assert!(self.study_timer.is_none());

        self.break_countdown = Countdown::from_minutes(self.break_config.duration_minutes);
        self.break_timer = Some(self.scheduler.schedule_repeating(TICK));
        self.state = SessionState::OnBreak;
        debug!("Break started for {} minutes", self.break_config.duration_minutes);
        true
    }

    /// Turn the offered break down. Only valid from `BreakPending`.
    pub fn decline_break(&mut self) -> bool {
        if self.state != SessionState::BreakPending {
            debug!("decline_break() ignored in state {:?}", self.state);
            return false;
        }
        self.reset();
        true
    }

    /// End the break early. Only valid from `OnBreak`.
    pub fn end_break(&mut self) -> bool {
        if self.state != SessionState::OnBreak {
            debug!("end_break() ignored in state {:?}", self.state);
            return false;
        }
        let elapsed_seconds = self.break_countdown.elapsed_seconds();
        self.reset();
        self.notifier.notify(&Notice::BreakSkipped { elapsed_seconds });
        true
    }

    /// Replace the break settings.
    ///
    /// A break already running keeps its length. A zero duration is ignored.
    pub fn set_break_config(&mut self, config: BreakConfig) -> bool {
        if config.duration_minutes == 0 {
            return false;
        }
        self.break_config = config;
        true
    }

    /// Change the exercise interval, restarting the reminder period.
    pub fn set_exercise_interval(&mut self, minutes: u32) -> bool {
        if self.torn_down {
            return false;
        }
        self.reminder.set_interval(minutes, &mut self.scheduler)
    }

    /// Change the exercise reminder text.
    pub fn set_exercise_message(&mut self, message: impl Into<String>) {
        self.reminder.set_message(message);
    }

    /// Run every timer firing due up to `until` (scheduler time).
    ///
    /// Returns the number of firings handled.
    pub fn advance_to(&mut self, until: Duration) -> usize {
        let mut handled = 0;
        while let Some(id) = self.scheduler.pop_due(until) {
            self.dispatch(id);
            handled += 1;
        }
        handled
    }

    /// Run every timer firing due in the next `by`.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.scheduler.now() + by;
        self.advance_to(until)
    }

    /// Cancel every timer. The cycle is left idle and inert: `start` and
    /// `set_exercise_interval` refuse to arm anything afterwards.
    pub fn teardown(&mut self) {
        self.cancel_study_timer();
        self.cancel_break_timer();
        self.reminder.disarm(&mut self.scheduler);
        self.state = SessionState::Idle;
        self.torn_down = true;
    }

    fn dispatch(&mut self, id: TimerId) {
        if self.study_timer == Some(id) {
            self.study_tick();
        } else if self.break_timer == Some(id) {
            self.break_tick();
        } else if self.reminder.owns(id) {
            let notice = self.reminder.fire();
            self.notifier.notify(&notice);
        } else {
            debug!("Ignoring firing of {id}, no longer armed");
        }
    }

    fn study_tick(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        if !self.study.tick() {
            return;
        }

        self.cancel_study_timer();
        self.state = SessionState::BreakPending;
        debug!("Study block finished, offering a break");
        self.notifier.notify(&Notice::BreakOffered {
            message: self.break_config.message.clone(),
            break_minutes: self.break_config.duration_minutes,
            study_seconds: self.study.elapsed_seconds(),
        });
    }

    fn break_tick(&mut self) {
        if self.state != SessionState::OnBreak {
            return;
        }
        if !self.break_countdown.tick() {
            return;
        }

        let elapsed_seconds = self.break_countdown.elapsed_seconds();
        self.reset();
        debug!("Break finished");
        self.notifier.notify(&Notice::BreakEnded { elapsed_seconds });
    }

    fn cancel_study_timer(&mut self) {
        if let Some(id) = self.study_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    fn cancel_break_timer(&mut self) {
        if let Some(id) = self.break_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Study seconds left.
    #[must_use]
    pub const fn remaining_study_seconds(&self) -> u64 {
        self.study.remaining_seconds()
    }

    /// Break seconds left.
    #[must_use]
    pub const fn remaining_break_seconds(&self) -> u64 {
        self.break_countdown.remaining_seconds()
    }

    /// Study block length in minutes.
    #[must_use]
    pub const fn custom_duration_minutes(&self) -> u32 {
        self.custom_duration_minutes
    }

    /// Break settings.
    #[must_use]
    pub const fn break_config(&self) -> &BreakConfig {
        &self.break_config
    }

    /// Exercise reminder settings.
    #[must_use]
    pub const fn exercise_config(&self) -> &ExerciseConfig {
        self.reminder.config()
    }

    /// Number of exercise reminders delivered.
    #[must_use]
    pub const fn exercise_reminders_fired(&self) -> u64 {
        self.reminder.fired()
    }

    /// Progress of whichever countdown the state shows (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        match self.state {
            SessionState::OnBreak => self.break_countdown.progress(),
            SessionState::BreakPending => 1.0,
            SessionState::Idle | SessionState::Running => self.study.progress(),
        }
    }

    /// Countdown to display for the current state, as MM:SS.
    #[must_use]
    pub fn display_time(&self) -> String {
        match self.state {
            SessionState::OnBreak => self.break_countdown.format_remaining(),
            _ => self.study.format_remaining(),
        }
    }

    /// Read-only view for display.
    #[must_use]
    pub fn snapshot(&self) -> CycleSnapshot {
        CycleSnapshot {
            state: self.state,
            remaining_study_seconds: self.remaining_study_seconds(),
            remaining_break_seconds: self.remaining_break_seconds(),
            custom_duration_minutes: self.custom_duration_minutes,
            break_minutes: self.break_config.duration_minutes,
            exercise_interval_minutes: self.reminder.config().interval_minutes,
        }
    }

    /// Scheduler time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// The scheduler driving this cycle.
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The injected notifier.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The injected notifier, mutably (to drain buffered notices).
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

impl<S: Scheduler, N: Notifier> Drop for SessionCycle<S, N> {
    fn drop(&mut self) {
        self.teardown();
    }
}
