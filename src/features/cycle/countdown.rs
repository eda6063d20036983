//! Countdown values and duration parsing/formatting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A whole-second countdown.
///
/// Holds no running flag of its own; the owning cycle decides when a tick
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    total_seconds: u64,
    remaining_seconds: u64,
}

impl Countdown {
    /// Create a countdown of the given number of seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self {
            total_seconds: seconds,
            remaining_seconds: seconds,
        }
    }

    /// Create a countdown from minutes.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self::new(minutes as u64 * 60)
    }

    /// Remove one second.
    ///
    /// Returns true if this tick brought the countdown to zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }

    /// Seconds left.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Seconds consumed since the countdown was seeded.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.total_seconds - self.remaining_seconds
    }

    /// Check if the countdown has reached zero.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Get progress as a fraction (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_seconds as f64 / self.total_seconds as f64)
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_mmss(self.remaining_seconds)
    }
}

/// Format a number of seconds as MM:SS (minutes may exceed 59).
#[must_use]
pub fn format_mmss(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.as_secs() / 60;

    if total_minutes < 1 {
        let seconds = d.as_secs();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes. Returns `None` for zero or unparseable
/// input.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u64>() {
        return minutes
            .checked_mul(60)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
    }

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else {
            if current_num.is_empty() {
                return None;
            }
            let num: u64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        }
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: u64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    (total_seconds > 0).then_some(Duration::from_secs(total_seconds))
}

/// Parse a duration that must be a positive whole number of minutes.
///
/// Used for the study and break settings, which the cycle stores in minutes.
#[must_use]
pub fn parse_minutes(s: &str) -> Option<u32> {
    let d = parse_duration(s)?;
    if d.as_secs() % 60 != 0 {
        return None;
    }
    u32::try_from(d.as_secs() / 60).ok()
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_new() {
        let countdown = Countdown::from_minutes(25);
        assert_eq!(countdown.remaining_seconds(), 1500);
        assert_eq!(countdown.elapsed_seconds(), 0);
        assert!(!countdown.is_finished());
    }

    #[test]
    fn test_countdown_tick_to_zero() {
        let mut countdown = Countdown::from_minutes(1);

        for _ in 0..59 {
            assert!(!countdown.tick());
        }

        assert!(countdown.tick());
        assert!(countdown.is_finished());
        // Further ticks never report a second completion
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining_seconds(), 0);
    }

    #[test]
    fn test_countdown_progress() {
        let mut countdown = Countdown::new(100);
        assert_eq!(countdown.progress(), 0.0);

        for _ in 0..50 {
            countdown.tick();
        }

        assert!((countdown.progress() - 0.5).abs() < 0.01);
        assert_eq!(Countdown::new(0).progress(), 0.0);
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25"), Some(Duration::from_secs(1500)));
        assert_eq!(parse_duration("25m"), Some(Duration::from_secs(1500)));
    }

    #[test]
    fn test_parse_duration_hours_and_seconds() {
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("2h30m"), Some(Duration::from_secs(9000)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("5x").is_none());
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("50"), Some(50));
        assert_eq!(parse_minutes("1h"), Some(60));
        assert_eq!(parse_minutes("90s"), None);
        assert_eq!(parse_minutes("0m"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(25 * 60)), "25 minutes");
        assert_eq!(format_duration(Duration::from_secs(60)), "1 minute");
        assert_eq!(format_duration(Duration::from_secs(7200)), "2 hours");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::from_secs(1)), "1 second");
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(6000), "100:00");
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(2.0, 4), "[████]");
    }
}
