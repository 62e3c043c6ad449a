//! Database row types and their conversion to domain records.

use chrono::{DateTime, Utc};
use notes_core::{Note, NoteId, OwnerId, User, UserId};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::StoreError;

/// Column list selected for notes, in `NoteRow` order.
pub const NOTE_COLUMNS: &str = "id, owner_id, title, content, created_at, updated_at";

/// Column list selected for users, in `UserRow` order.
pub const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = StoreError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let owner_id = OwnerId::new(&row.owner_id).map_err(|e| {
            StoreError::CorruptRow(format!("note {} has invalid owner_id: {}", row.id, e))
        })?;
        Ok(Note {
            id: NoteId::from_uuid(row.id),
            owner_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
