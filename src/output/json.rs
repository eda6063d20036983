//! JSON output formatting.

use serde::Serialize;
use serde_json::json;

use crate::config::{CycleConfig, SettingKey};
use crate::error::StudyError;
use crate::features::history::HistoryEntry;
use crate::features::todos::Todo;

/// Format todos as JSON
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_todos_json(todos: &[Todo], list_name: &str) -> Result<String, StudyError> {
    let output = json!({
        "list": list_name,
        "count": todos.len(),
        "items": todos
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format history entries as JSON
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_history_json(entries: &[HistoryEntry]) -> Result<String, StudyError> {
    let output = json!({
        "count": entries.len(),
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the cycle settings as a JSON object keyed by setting name.
///
/// Minute values stay numbers, messages stay strings.
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn format_settings_json(config: &CycleConfig) -> Result<String, StudyError> {
    let mut map = serde_json::Map::new();
    for key in SettingKey::ALL {
        let value = match key {
            SettingKey::StudyMinutes => json!(config.study_minutes),
            SettingKey::BreakMinutes => json!(config.break_minutes),
            SettingKey::ExerciseInterval => json!(config.exercise_interval_minutes),
            SettingKey::BreakMessage | SettingKey::ExerciseMessage => json!(config.get(key)),
        };
        map.insert(key.name().to_string(), value);
    }
    Ok(serde_json::to_string_pretty(&map)?)
}

/// Serialize any value to pretty JSON.
///
/// # Errors
///
/// Returns `StudyError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::history::EntryKind;

    #[test]
    fn test_format_todos_json() {
        let todos = vec![Todo::new("Essay outline").unwrap()];
        let json = format_todos_json(&todos, "Todos").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["list"], "Todos");
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["title"], "Essay outline");
        assert_eq!(parsed["items"][0]["done"], false);
    }

    #[test]
    fn test_format_history_json() {
        let entries = vec![HistoryEntry::new(EntryKind::Break, 300, true)];
        let json = format_history_json(&entries).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["kind"], "break");
        assert_eq!(parsed["items"][0]["skipped"], true);
    }

    #[test]
    fn test_format_settings_json() {
        let json = format_settings_json(&CycleConfig::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["study_minutes"], 50);
        assert_eq!(parsed["break_minutes"], 10);
        assert!(parsed["exercise_message"].is_string());
    }
}
