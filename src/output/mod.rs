//! Output formatting for studydesk.
//!
//! This module provides formatters for displaying todos, history and the
//! cycle in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::CycleConfig;
use crate::error::StudyError;
use crate::features::cycle::CycleSnapshot;
use crate::features::history::{HistoryEntry, HistorySummary};
use crate::features::todos::Todo;

pub use json::*;
pub use pretty::*;

/// Format todos based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_todos(todos: &[Todo], title: &str, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_todos_pretty(todos, title)),
        OutputFormat::Json => format_todos_json(todos, title),
    }
}

/// Format a single todo based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_todo(todo: &Todo, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_todo_pretty(todo)),
        OutputFormat::Json => to_json(todo),
    }
}

/// Format history entries based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_history(entries: &[HistoryEntry], format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(entries)),
        OutputFormat::Json => format_history_json(entries),
    }
}

/// Format a history summary based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_summary(summary: &HistorySummary, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

/// Format a cycle snapshot based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_snapshot(snapshot: &CycleSnapshot, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_snapshot_pretty(snapshot)),
        OutputFormat::Json => to_json(snapshot),
    }
}

/// Format cycle settings based on output format
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_settings(config: &CycleConfig, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(config)),
        OutputFormat::Json => format_settings_json(config),
    }
}
