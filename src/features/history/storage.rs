//! History storage.

use chrono::{DateTime, Local, Utc};
use rusqlite::{params, Row};

use super::entry::{EntryKind, HistoryEntry};
use super::summary::{HistorySummary, Period};
use crate::error::StudyError;
use crate::features::cycle::Notice;
use crate::storage::Database;

/// Storage for the study/break log.
pub struct HistoryStorage<'a> {
    db: &'a Database,
}

impl<'a> HistoryStorage<'a> {
    /// Create storage over an open database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert an entry, filling in its ID.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the insert fails.
    pub fn record(&self, entry: &mut HistoryEntry) -> Result<(), StudyError> {
        let conn = self.db.connection();
        conn.execute(
            r"INSERT INTO history (kind, seconds, skipped, finished_at)
              VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.kind.as_str(),
                i64::try_from(entry.seconds).unwrap_or(i64::MAX),
                entry.skipped,
                entry.finished_at.to_rfc3339(),
            ],
        )
        .map_err(|e| StudyError::Database(format!("Failed to record history: {e}")))?;

        entry.id = Some(conn.last_insert_rowid());
        tracing::info!("Logged {} of {}s", entry.kind, entry.seconds);
        Ok(())
    }

    /// Log whatever a cycle notice stands for.
    ///
    /// Returns the saved entry, or `None` for notices that are not logged.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the insert fails.
    pub fn record_notice(&self, notice: &Notice) -> Result<Option<HistoryEntry>, StudyError> {
        let Some(mut entry) = HistoryEntry::from_notice(notice) else {
            return Ok(None);
        };
        self.record(&mut entry)?;
        Ok(Some(entry))
    }

    /// Most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, StudyError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            r"SELECT id, kind, seconds, skipped, finished_at FROM history
              ORDER BY finished_at DESC, id DESC LIMIT ?1",
            params![limit],
        )
    }

    /// Entries finished at or after `start` (all entries when `None`).
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the query fails.
    pub fn since(&self, start: Option<DateTime<Utc>>) -> Result<Vec<HistoryEntry>, StudyError> {
        match start {
            Some(start) => self.query(
                r"SELECT id, kind, seconds, skipped, finished_at FROM history
                  WHERE finished_at >= ?1 ORDER BY finished_at, id",
                params![start.to_rfc3339()],
            ),
            None => self.query(
                r"SELECT id, kind, seconds, skipped, finished_at FROM history
                  ORDER BY finished_at, id",
                params![],
            ),
        }
    }

    /// Totals for a period ending now.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the query fails.
    pub fn summary(&self, period: Period) -> Result<HistorySummary, StudyError> {
        let entries = self.since(period.start(Local::now()))?;
        Ok(HistorySummary::from_entries(period, &entries))
    }

    fn query(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<HistoryEntry>, StudyError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_entry)
            .map_err(|e| StudyError::Database(format!("Failed to query history: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }
}

/// Convert a database row to a `HistoryEntry`.
fn row_to_entry(row: &Row<'_>) -> Result<HistoryEntry, rusqlite::Error> {
    let kind: String = row.get(1)?;
    let seconds: i64 = row.get(2)?;
    let finished_at: String = row.get(4)?;

    Ok(HistoryEntry {
        id: Some(row.get(0)?),
        kind: EntryKind::parse(&kind).unwrap_or(EntryKind::Study),
        seconds: u64::try_from(seconds).unwrap_or(0),
        skipped: row.get(3)?,
        finished_at: DateTime::parse_from_rfc3339(&finished_at)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
