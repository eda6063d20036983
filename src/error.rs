//! Error types for studydesk.

use thiserror::Error;

/// Errors returned by studydesk operations.
///
/// The session cycle itself never fails; these cover everything around it:
/// settings, storage, input parsing and the terminal.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Configuration could not be read, parsed or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// User input was rejected before reaching the cycle.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The terminal could not be set up or drawn to.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// An I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StudyError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = StudyError::InvalidInput("duration must be positive".to_string());
        assert_eq!(err.to_string(), "invalid input: duration must be positive");

        let err = StudyError::NotFound("todo 7".to_string());
        assert_eq!(err.to_string(), "not found: todo 7");
    }

    #[test]
    fn test_from_rusqlite() {
        let err: StudyError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StudyError::Database(_)));
    }
}
