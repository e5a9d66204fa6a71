//! Store error types
//!
//! Every failure is terminal for the triggering user action. Nothing is
//! retried; the page shows the message and waits for the next action.

use thiserror::Error;

/// Record identifier (creation time in ms, bumped on collision)
pub type RecordId = i64;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The required field (book title, draft content) was empty after trimming
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    /// No record with this id in the list the operation targets
    #[error("no record with id {id}")]
    NotFound { id: RecordId },

    /// Import payload could not be parsed or had an unexpected shape
    #[error("invalid import data: {0}")]
    Format(String),

    /// The browser would not schedule the auto-save timer
    #[error("auto-save timer unavailable: {0}")]
    Timer(String),

    /// The storage backend refused the write (unavailable, quota exceeded)
    #[error("storage write failed for '{key}': {reason}")]
    Storage { key: String, reason: String },
}

impl StoreError {
    pub fn storage(key: &str, reason: impl ToString) -> Self {
        Self::Storage {
            key: key.to_owned(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}
