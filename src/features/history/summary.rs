//! History summaries over a period.

use chrono::{DateTime, Duration, Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{EntryKind, HistoryEntry};
use crate::error::StudyError;

/// Summary time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Since local midnight
    #[default]
    Today,
    /// Today and the six days before
    Week,
    /// Everything logged
    All,
}

impl Period {
    /// Earliest finish time included, or `None` for no lower bound.
    #[must_use]
    pub fn start(&self, now: DateTime<Local>) -> Option<DateTime<Utc>> {
        let days_back = match self {
            Self::Today => 0,
            Self::Week => 6,
            Self::All => return None,
        };
        let day = now.date_naive() - Duration::days(days_back);
        day.and_time(NaiveTime::MIN)
            .and_local_timezone(Local)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Last 7 Days",
            Self::All => "All Time",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" => Ok(Self::Today),
            "week" | "w" | "7d" => Ok(Self::Week),
            "all" | "alltime" | "all-time" => Ok(Self::All),
            _ => Err(StudyError::InvalidInput(format!(
                "Unknown period '{s}' (expected today, week or all)"
            ))),
        }
    }
}

/// Totals over a set of history entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Period name
    pub period: String,
    /// Time spent studying
    pub study_seconds: u64,
    /// Finished study blocks
    pub study_blocks: u64,
    /// Time spent on breaks
    pub break_seconds: u64,
    /// Finished breaks
    pub breaks: u64,
    /// Breaks ended by hand
    pub skipped_breaks: u64,
}

impl HistorySummary {
    /// Total up `entries`.
    #[must_use]
    pub fn from_entries(period: Period, entries: &[HistoryEntry]) -> Self {
        let mut summary = Self {
            period: period.display_name().to_string(),
            ..Self::default()
        };

        for entry in entries {
            match entry.kind {
                EntryKind::Study => {
                    summary.study_seconds += entry.seconds;
                    summary.study_blocks += 1;
                }
                EntryKind::Break => {
                    summary.break_seconds += entry.seconds;
                    summary.breaks += 1;
                    if entry.skipped {
                        summary.skipped_breaks += 1;
                    }
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_period_parse() {
        assert_eq!("today".parse::<Period>().unwrap(), Period::Today);
        assert_eq!("W".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("all".parse::<Period>().unwrap(), Period::All);
        assert!("fortnight".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_start() {
        let now = Local.with_ymd_and_hms(2024, 3, 14, 15, 30, 0).single().unwrap();

        let today = Period::Today.start(now).unwrap().with_timezone(&Local);
        assert_eq!(today.date_naive(), now.date_naive());
        assert_eq!(today.time(), NaiveTime::MIN);

        let week = Period::Week.start(now).unwrap().with_timezone(&Local);
        assert_eq!((now.date_naive() - week.date_naive()).num_days(), 6);

        assert!(Period::All.start(now).is_none());
    }

    #[test]
    fn test_summary_from_entries() {
        let entries = vec![
            HistoryEntry::new(EntryKind::Study, 3000, false),
            HistoryEntry::new(EntryKind::Break, 600, false),
            HistoryEntry::new(EntryKind::Study, 1500, false),
            HistoryEntry::new(EntryKind::Break, 120, true),
        ];

        let summary = HistorySummary::from_entries(Period::Today, &entries);
        assert_eq!(summary.period, "Today");
        assert_eq!(summary.study_seconds, 4500);
        assert_eq!(summary.study_blocks, 2);
        assert_eq!(summary.break_seconds, 720);
        assert_eq!(summary.breaks, 2);
        assert_eq!(summary.skipped_breaks, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = HistorySummary::from_entries(Period::All, &[]);
        assert_eq!(summary.study_blocks, 0);
        assert_eq!(summary.period, "All Time");
    }
}
