//! Todo storage.
//!
//! Persists todos to the local database.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::todo::Todo;
use crate::error::StudyError;
use crate::storage::Database;

const COLUMNS: &str = "id, title, done, archived, created_at, completed_at";

/// Storage for todos.
pub struct TodoStorage<'a> {
    db: &'a Database,
}

impl<'a> TodoStorage<'a> {
    /// Create storage over an open database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Save a todo.
    ///
    /// If the todo has an ID, it will be updated. Otherwise, it will be inserted.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the write fails.
    pub fn save(&self, todo: &mut Todo) -> Result<(), StudyError> {
        let conn = self.db.connection();

        if let Some(id) = todo.id {
            conn.execute(
                r"UPDATE todos SET title = ?1, done = ?2, archived = ?3,
                  created_at = ?4, completed_at = ?5 WHERE id = ?6",
                params![
                    todo.title,
                    todo.done,
                    todo.archived,
                    todo.created_at.to_rfc3339(),
                    todo.completed_at.map(|t| t.to_rfc3339()),
                    id,
                ],
            )
            .map_err(|e| StudyError::Database(format!("Failed to update todo: {e}")))?;
        } else {
            conn.execute(
                r"INSERT INTO todos (title, done, archived, created_at, completed_at)
                  VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    todo.title,
                    todo.done,
                    todo.archived,
                    todo.created_at.to_rfc3339(),
                    todo.completed_at.map(|t| t.to_rfc3339()),
                ],
            )
            .map_err(|e| StudyError::Database(format!("Failed to insert todo: {e}")))?;
            todo.id = Some(conn.last_insert_rowid());
            tracing::info!("Added todo #{}", conn.last_insert_rowid());
        }

        Ok(())
    }

    /// Add a new open todo.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank or the write fails.
    pub fn add(&self, title: &str) -> Result<Todo, StudyError> {
        let mut todo = Todo::new(title)?;
        self.save(&mut todo)?;
        Ok(todo)
    }

    /// Get a todo by ID.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<Todo>, StudyError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"),
                [id],
                row_to_todo,
            )
            .optional()
            .map_err(|e| StudyError::Database(format!("Failed to query todo: {e}")))
    }

    /// Get a todo by ID, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotFound` if there is no such todo.
    pub fn require(&self, id: i64) -> Result<Todo, StudyError> {
        self.get(id)?
            .ok_or_else(|| StudyError::NotFound(format!("todo #{id}")))
    }

    /// List non-archived todos, open ones first.
    ///
    /// With `include_done` false only open todos are returned.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the query fails.
    pub fn list(&self, include_done: bool) -> Result<Vec<Todo>, StudyError> {
        let filter = if include_done { "" } else { "AND done = 0" };
        self.query(&format!(
            "SELECT {COLUMNS} FROM todos WHERE archived = 0 {filter} ORDER BY done, id"
        ))
    }

    /// List archived todos, most recently finished first.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the query fails.
    pub fn archived(&self) -> Result<Vec<Todo>, StudyError> {
        self.query(&format!(
            "SELECT {COLUMNS} FROM todos WHERE archived = 1 ORDER BY completed_at DESC, id DESC"
        ))
    }

    /// Mark a todo finished.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotFound` if there is no such todo.
    pub fn complete(&self, id: i64) -> Result<Todo, StudyError> {
        let mut todo = self.require(id)?;
        todo.complete();
        self.save(&mut todo)?;
        Ok(todo)
    }

    /// Mark a todo open again.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotFound` if there is no such todo.
    pub fn reopen(&self, id: i64) -> Result<Todo, StudyError> {
        let mut todo = self.require(id)?;
        todo.reopen();
        self.save(&mut todo)?;
        Ok(todo)
    }

    /// Flip a todo between open and finished.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotFound` if there is no such todo.
    pub fn toggle(&self, id: i64) -> Result<Todo, StudyError> {
        let mut todo = self.require(id)?;
        todo.toggle();
        self.save(&mut todo)?;
        Ok(todo)
    }

    /// Move every finished todo to the archive.
    ///
    /// Returns the number of todos archived.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Database` if the update fails.
    pub fn archive_done(&self) -> Result<usize, StudyError> {
        let count = self
            .db
            .connection()
            .execute("UPDATE todos SET archived = 1 WHERE done = 1 AND archived = 0", [])
            .map_err(|e| StudyError::Database(format!("Failed to archive todos: {e}")))?;
        tracing::info!("Archived {count} finished todos");
        Ok(count)
    }

    /// Delete a todo.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotFound` if there is no such todo.
    pub fn remove(&self, id: i64) -> Result<(), StudyError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM todos WHERE id = ?1", [id])
            .map_err(|e| StudyError::Database(format!("Failed to delete todo: {e}")))?;

        if rows == 0 {
            return Err(StudyError::NotFound(format!("todo #{id}")));
        }
        Ok(())
    }

    fn query(&self, sql: &str) -> Result<Vec<Todo>, StudyError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_todo)
            .map_err(|e| StudyError::Database(format!("Failed to query todos: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }
}

fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

/// Convert a database row to a Todo.
fn row_to_todo(row: &Row<'_>) -> Result<Todo, rusqlite::Error> {
    let created_at: String = row.get(4)?;
    let completed_at: Option<String> = row.get(5)?;

    Ok(Todo {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        done: row.get(2)?,
        archived: row.get(3)?,
        created_at: parse_time(&created_at).unwrap_or_else(Utc::now),
        completed_at: completed_at.as_deref().and_then(parse_time),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let db = Database::open_in_memory().unwrap();
        let storage = TodoStorage::new(&db);

        let todo = storage.add("Read chapter 3").unwrap();
        let id = todo.id.unwrap();

        let loaded = storage.get(id).unwrap().unwrap();
        assert_eq!(loaded.title, "Read chapter 3");
        assert!(!loaded.done);
        assert_eq!(loaded.created_at.timestamp(), todo.created_at.timestamp());
    }

    #[test]
    fn test_add_blank_title_fails() {
        let db = Database::open_in_memory().unwrap();
        let storage = TodoStorage::new(&db);
        assert!(storage.add("  ").is_err());
        assert!(storage.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_list_open_and_all() {
        let db = Database::open_in_memory().unwrap();
        let storage = TodoStorage::new(&db);

        let a = storage.add("A").unwrap();
        storage.add("B").unwrap();
        storage.complete(a.id.unwrap()).unwrap();

        let open = storage.list(false).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "B");

        let all = storage.list(true).unwrap();
        assert_eq!(all.len(), 2);
        // Open todos sort first
        assert_eq!(all[0].title, "B");
        assert!(all[1].done);
    }

    #[test]
    fn test_complete_reopen_toggle() {
        let db = Database::open_in_memory().unwrap();
        let storage = TodoStorage::new(&db);
        let id = storage.add("Flashcards").unwrap().id.unwrap();

        assert!(storage.complete(id).unwrap().done);
        assert!(storage.get(id).unwrap().unwrap().completed_at.is_some());
        assert!(!storage.reopen(id).unwrap().done);
        assert!(storage.toggle(id).unwrap().done);
    }

    #[test]
    fn test_archive_done() {
        let db = Database::open_in_memory().unwrap();
        let storage = TodoStorage::new(&db);

        let a = storage.add("A").unwrap().id.unwrap();
        let b = storage.add("B").unwrap().id.unwrap();
        storage.add("C").unwrap();
        storage.complete(a).unwrap();
        storage.complete(b).unwrap();

        assert_eq!(storage.archive_done().unwrap(), 2);
        assert_eq!(storage.archive_done().unwrap(), 0);

        let remaining = storage.list(true).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "C");
        assert_eq!(storage.archived().unwrap().len(), 2);
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();
        let storage = TodoStorage::new(&db);
        let id = storage.add("Temp").unwrap().id.unwrap();

        storage.remove(id).unwrap();
        assert!(storage.get(id).unwrap().is_none());
        assert!(matches!(storage.remove(id), Err(StudyError::NotFound(_))));
    }

    #[test]
    fn test_missing_todo() {
        let db = Database::open_in_memory().unwrap();
        let storage = TodoStorage::new(&db);
        assert!(matches!(storage.complete(99), Err(StudyError::NotFound(_))));
    }
}
