use std::time::Duration;

use colored::Colorize;

use crate::config::{CycleConfig, SettingKey};
use crate::features::cycle::{format_duration, format_mmss, CycleSnapshot, SessionState};
use crate::features::history::{EntryKind, HistoryEntry, HistorySummary};
use crate::features::todos::Todo;

/// Format a list of todos as a pretty table
pub fn format_todos_pretty(todos: &[Todo], title: &str) -> String {
    if todos.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{} ({} items)\n", title, todos.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for todo in todos {
        let marker = if todo.done {
            todo.marker().green()
        } else {
            todo.marker().white()
        };
        let id = format!("#{}", todo.id.unwrap_or_default());
        let title = if todo.done {
            todo.title.dimmed().to_string()
        } else {
            todo.title.bold().to_string()
        };

        output.push_str(&format!("{marker} {}  {title}\n", format!("{id:>4}").dimmed()));
    }

    output
}

/// Format a single todo as pretty output
pub fn format_todo_pretty(todo: &Todo) -> String {
    let marker = if todo.done {
        todo.marker().green()
    } else {
        todo.marker().white()
    };

    let mut output = format!("{} {}\n", marker, todo.title.bold());
    output.push_str(&format!(
        "  {}: {}\n",
        "ID".dimmed(),
        todo.id.unwrap_or_default()
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        todo.created_at_local().format("%Y-%m-%d %H:%M")
    ));

    if let Some(done) = todo.completed_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Finished".dimmed(),
            done.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        ));
    }

    if todo.archived {
        output.push_str(&format!("  {}\n", "Archived".dimmed()));
    }

    output
}

/// Format recent history entries
pub fn format_history_pretty(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "History (0)\n  Nothing logged yet".to_string();
    }

    let mut output = format!("History ({})\n", entries.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for entry in entries {
        let kind = match entry.kind {
            EntryKind::Study => format!("{:<10}", "Study").cyan(),
            EntryKind::Break => format!("{:<10}", "Break").green(),
        };
        let skipped = if entry.skipped {
            " (ended early)".yellow().to_string()
        } else {
            String::new()
        };

        output.push_str(&format!(
            "{}  {} {:>7}{}\n",
            entry.finished_at_local().format("%m/%d %H:%M").to_string().dimmed(),
            kind,
            format_mmss(entry.seconds),
            skipped
        ));
    }

    output
}

/// Format a history summary
pub fn format_summary_pretty(summary: &HistorySummary) -> String {
    let mut output = Vec::new();

    output.push(format!("📊 Study Summary: {}", summary.period).bold().to_string());
    output.push("─".repeat(40));
    output.push(format!(
        "Study time:     {}",
        format_duration(Duration::from_secs(summary.study_seconds)).green()
    ));
    output.push(format!("Study blocks:   {}", summary.study_blocks));
    output.push(format!(
        "Break time:     {}",
        format_duration(Duration::from_secs(summary.break_seconds))
    ));
    output.push(format!("Breaks:         {}", summary.breaks));

    if summary.skipped_breaks > 0 {
        output.push(format!(
            "Ended early:    {}",
            summary.skipped_breaks.to_string().yellow()
        ));
    }

    output.join("\n")
}

/// Format a cycle snapshot
pub fn format_snapshot_pretty(snapshot: &CycleSnapshot) -> String {
    let state = match snapshot.state {
        SessionState::Idle => snapshot.state.display_name().white(),
        SessionState::Running => snapshot.state.display_name().green(),
        SessionState::BreakPending => snapshot.state.display_name().yellow(),
        SessionState::OnBreak => snapshot.state.display_name().cyan(),
    };
    let remaining = if snapshot.state == SessionState::OnBreak {
        snapshot.remaining_break_seconds
    } else {
        snapshot.remaining_study_seconds
    };

    let mut output = Vec::new();
    output.push(format!("⏱️  {}  {}", state, format_mmss(remaining).bold()));
    output.push("─".repeat(40));
    output.push(format!(
        "Study block:    {} min",
        snapshot.custom_duration_minutes
    ));
    output.push(format!("Break:          {} min", snapshot.break_minutes));
    output.push(format!(
        "Exercise every: {} min",
        snapshot.exercise_interval_minutes
    ));

    output.join("\n")
}

/// Format the cycle settings as `key: value` lines
pub fn format_settings_pretty(config: &CycleConfig) -> String {
    SettingKey::ALL
        .iter()
        .map(|key| format!("{} {}", format!("{:<26}", format!("{key}:")).dimmed(), config.get(*key)))
        .collect::<Vec<_>>()
        .join("\n")
}
