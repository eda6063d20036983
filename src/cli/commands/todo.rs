//! Todo command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, TodoCommands};
use crate::error::StudyError;
use crate::features::todos::TodoStorage;
use crate::output::{format_todo, format_todos, to_json};
use crate::storage::Database;

/// Execute todo subcommands.
///
/// # Errors
///
/// Returns an error if the todo does not exist, the title is blank, or the
/// database write fails.
pub fn todo(db: &Database, cmd: TodoCommands, format: OutputFormat) -> Result<String, StudyError> {
    let storage = TodoStorage::new(db);

    match cmd {
        TodoCommands::Add { title } => {
            let todo = storage.add(&title)?;
            match format {
                OutputFormat::Json => to_json(&todo),
                OutputFormat::Pretty => Ok(format!(
                    "{} Added #{}: {}",
                    "✓".green(),
                    todo.id.unwrap_or_default(),
                    todo.title
                )),
            }
        }

        TodoCommands::List { archived: true, .. } => {
            format_todos(&storage.archived()?, "Archived todos", format)
        }

        TodoCommands::List { all, .. } => {
            let todos = storage.list(all)?;
            let title = if all { "Todos" } else { "Open todos" };
            format_todos(&todos, title, format)
        }

        TodoCommands::Done { id } => format_todo(&storage.complete(id)?, format),

        TodoCommands::Reopen { id } => format_todo(&storage.reopen(id)?, format),

        TodoCommands::Archive => {
            let count = storage.archive_done()?;
            match format {
                OutputFormat::Json => to_json(&json!({ "archived": count })),
                OutputFormat::Pretty => Ok(format!(
                    "{} Archived {count} finished todo{}",
                    "✓".green(),
                    if count == 1 { "" } else { "s" }
                )),
            }
        }

        TodoCommands::Remove { id } => {
            storage.remove(id)?;
            match format {
                OutputFormat::Json => to_json(&json!({ "removed": id })),
                OutputFormat::Pretty => Ok(format!("{} Removed #{id}", "✓".green())),
            }
        }
    }
}
