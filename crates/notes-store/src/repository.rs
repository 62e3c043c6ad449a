//! Repository traits: the seam between the server and a storage backend.
//!
//! Every note operation takes the caller's [`OwnerId`]. Reads, updates,
//! deletes and counts filter on it; create stamps it. There is
//! no method that touches a note without an owner.
//!
//! Implemented by [`PgStore`](crate::PgStore) and
//! [`MemoryStore`](crate::MemoryStore).

use async_trait::async_trait;
use notes_core::{Note, NoteId, NoteInput, NoteQuery, OwnerId, User, UserId};

use crate::error::StoreResult;
use crate::models::NewUser;

/// Owner-scoped note storage.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Notes owned by `owner`, filtered, ordered and windowed by `query`.
    async fn list(&self, owner: &OwnerId, query: &NoteQuery) -> StoreResult<Vec<Note>>;

    /// Number of notes owned by `owner` matching `search`, ignoring pagination.
    async fn count(&self, owner: &OwnerId, search: Option<&str>) -> StoreResult<u64>;

    /// A single note. `NoteNotFound` if it is missing or owned by someone else.
    async fn get(&self, owner: &OwnerId, id: NoteId) -> StoreResult<Note>;

    /// Persist a new note with a fresh id and `created_at == updated_at`.
    async fn create(&self, owner: &OwnerId, input: &NoteInput) -> StoreResult<Note>;

    /// Overwrite title and content and advance `updated_at`.
    async fn update(&self, owner: &OwnerId, id: NoteId, input: &NoteInput) -> StoreResult<Note>;

    /// Hard-delete a note.
    async fn delete(&self, owner: &OwnerId, id: NoteId) -> StoreResult<()>;
}

/// Credential storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. `UsernameTaken` / `EmailTaken` on duplicates.
    async fn create_user(&self, user: &NewUser) -> StoreResult<User>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// `UserNotFound` if absent.
    async fn find_by_id(&self, id: UserId) -> StoreResult<User>;

    async fn username_exists(&self, username: &str) -> StoreResult<bool>;

    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
}
