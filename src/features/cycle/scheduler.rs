//! Repeating timers for the session cycle.
//!
//! The scheduler does not call back into anything. It hands out due firings
//! one at a time through [`Scheduler::pop_due`], which lets the caller cancel
//! or arm timers between two firings of the same instant.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a registered repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A source of repeating timers.
///
/// Time is an offset from an arbitrary origin chosen by whoever drives the
/// scheduler: real elapsed time in the terminal UI, virtual seconds in tests.
pub trait Scheduler {
    /// Current scheduler time.
    fn now(&self) -> Duration;

    /// Register a timer that fires every `period`, first at `now + period`.
    fn schedule_repeating(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer. Returns false if it was not armed.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Take the earliest firing due at or before `until`.
    ///
    /// Moves `now` to the firing time, or to `until` when nothing is due.
    fn pop_due(&mut self, until: Duration) -> Option<TimerId>;

    /// Number of armed timers.
    fn armed(&self) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    period: Duration,
    next_due: Duration,
}

/// Scheduler backed by an ordered table of intervals.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Interval>,
}

impl IntervalScheduler {
    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Period of an armed timer.
    #[must_use]
    pub fn period(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(&id).map(|t| t.period)
    }

    /// Next due time of an armed timer.
    #[must_use]
    pub fn next_due(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(&id).map(|t| t.next_due)
    }
}

impl Scheduler for IntervalScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        // A zero period would fire forever within one pop_due drain
        let period = period.max(Duration::from_millis(1));
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Interval {
                period,
                next_due: self.now + period,
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        // Ids grow with registration order, so min_by_key keeps ties stable
        let due = self
            .timers
            .iter()
            .filter(|(_, t)| t.next_due <= until)
            .min_by_key(|(id, t)| (t.next_due, **id))
            .map(|(id, _)| *id);

        let Some(id) = due else {
            self.now = self.now.max(until);
            return None;
        };

        if let Some(timer) = self.timers.get_mut(&id) {
            self.now = self.now.max(timer.next_due);
            timer.next_due += timer.period;
        }
        Some(id)
    }

    fn armed(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn drain(scheduler: &mut IntervalScheduler, until: Duration) -> Vec<TimerId> {
        std::iter::from_fn(|| scheduler.pop_due(until)).collect()
    }

    #[test]
    fn test_nothing_due_moves_clock() {
        let mut scheduler = IntervalScheduler::new();
        assert!(scheduler.pop_due(Duration::from_secs(5)).is_none());
        assert_eq!(scheduler.now(), Duration::from_secs(5));
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut scheduler = IntervalScheduler::new();
        let id = scheduler.schedule_repeating(SECOND);

        let fired = drain(&mut scheduler, Duration::from_millis(3500));
        assert_eq!(fired, vec![id, id, id]);
        assert_eq!(scheduler.now(), Duration::from_millis(3500));
        assert_eq!(scheduler.next_due(id), Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_first_firing_is_one_period_after_arming() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.pop_due(Duration::from_secs(10));

        let id = scheduler.schedule_repeating(Duration::from_secs(60));
        assert_eq!(scheduler.next_due(id), Some(Duration::from_secs(70)));
        assert!(drain(&mut scheduler, Duration::from_secs(69)).is_empty());
        assert_eq!(drain(&mut scheduler, Duration::from_secs(70)), vec![id]);
    }

    #[test]
    fn test_interleaves_by_due_time() {
        let mut scheduler = IntervalScheduler::new();
        let fast = scheduler.schedule_repeating(SECOND);
        let slow = scheduler.schedule_repeating(Duration::from_secs(2));

        let fired = drain(&mut scheduler, Duration::from_secs(2));
        // Both due at t=2; the earlier registration fires first
        assert_eq!(fired, vec![fast, fast, slow]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = IntervalScheduler::new();
        let id = scheduler.schedule_repeating(SECOND);
        assert_eq!(scheduler.armed(), 1);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.armed(), 0);
        assert!(drain(&mut scheduler, Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_cancel_between_firings() {
        let mut scheduler = IntervalScheduler::new();
        let id = scheduler.schedule_repeating(SECOND);
        let until = Duration::from_secs(10);

        assert_eq!(scheduler.pop_due(until), Some(id));
        scheduler.cancel(id);
        assert_eq!(scheduler.pop_due(until), None);
        assert_eq!(scheduler.now(), until);
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.pop_due(Duration::from_secs(10));
        scheduler.pop_due(Duration::from_secs(3));
        assert_eq!(scheduler.now(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut scheduler = IntervalScheduler::new();
        let id = scheduler.schedule_repeating(Duration::ZERO);
        assert_eq!(scheduler.period(id), Some(Duration::from_millis(1)));
    }
}
