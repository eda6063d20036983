//! History command implementation.

use crate::cli::args::{HistoryCommands, OutputFormat};
use crate::error::StudyError;
use crate::features::history::{HistoryStorage, Period};
use crate::output::{format_history, format_summary};
use crate::storage::Database;

/// Execute history subcommands (summary of today by default).
///
/// # Errors
///
/// Returns an error for an unknown period or if the database query fails.
pub fn history(
    db: &Database,
    cmd: Option<HistoryCommands>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let storage = HistoryStorage::new(db);

    match cmd {
        Some(HistoryCommands::List { limit }) => format_history(&storage.recent(limit)?, format),
        Some(HistoryCommands::Summary { period }) => {
            let period: Period = period.parse()?;
            format_summary(&storage.summary(period)?, format)
        }
        None => format_summary(&storage.summary(Period::Today)?, format),
    }
}
