//! Error types for the storage layer.

use notes_core::{NoteId, UserId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No note with this id belongs to the caller.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A user with this username already exists.
    #[error("username already exists: {0}")]
    UsernameTaken(String),

    /// A user with this email already exists.
    #[error("email already exists: {0}")]
    EmailTaken(String),

    /// A stored row could not be mapped back to a domain record.
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether this error means the target record does not exist for the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoteNotFound(_) | Self::UserNotFound(_))
    }

    /// Whether this error is a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken(_) | Self::EmailTaken(_))
    }
}
