//! In-memory repositories for tests and database-less development runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use notes_core::{Note, NoteId, NoteInput, NoteQuery, OwnerId, User, UserId};

use crate::error::{StoreError, StoreResult};
use crate::models::NewUser;
use crate::repository::{NoteRepository, UserRepository};

#[derive(Debug, Default)]
struct State {
    notes: HashMap<NoteId, Note>,
    users: HashMap<UserId, User>,
}

/// Process-local store with the same owner-scoping rules as `PgStore`.
///
/// Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn owned<'a>(state: &'a mut State, owner: &OwnerId, id: NoteId) -> StoreResult<&'a mut Note> {
        state
            .notes
            .get_mut(&id)
            .filter(|note| &note.owner_id == owner)
            .ok_or(StoreError::NoteNotFound(id))
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn list(&self, owner: &OwnerId, query: &NoteQuery) -> StoreResult<Vec<Note>> {
        let state = self.lock();
        let mut notes: Vec<Note> = state
            .notes
            .values()
            .filter(|note| &note.owner_id == owner && query.matches(note))
            .cloned()
            .collect();
        drop(state);

        notes.sort_by(|a, b| query.compare(a, b));

        if let Some(page) = query.pagination {
            let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
            notes = notes.into_iter().skip(offset).take(limit).collect();
        }
        Ok(notes)
    }

    async fn count(&self, owner: &OwnerId, search: Option<&str>) -> StoreResult<u64> {
        let filter = NoteQuery::new().search(search.unwrap_or_default());
        let state = self.lock();
        let count = state
            .notes
            .values()
            .filter(|note| &note.owner_id == owner && filter.matches(note))
            .count();
        Ok(count as u64)
    }

    async fn get(&self, owner: &OwnerId, id: NoteId) -> StoreResult<Note> {
        let mut state = self.lock();
        Self::owned(&mut state, owner, id).map(|note| note.clone())
    }

    async fn create(&self, owner: &OwnerId, input: &NoteInput) -> StoreResult<Note> {
        let now = notes_core::now();
        let note = Note {
            id: NoteId::new(),
            owner_id: owner.clone(),
            title: input.title().to_string(),
            content: input.content().map(String::from),
            created_at: now,
            updated_at: now,
        };
        self.lock().notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, owner: &OwnerId, id: NoteId, input: &NoteInput) -> StoreResult<Note> {
        let mut state = self.lock();
        let note = Self::owned(&mut state, owner, id)?;
        note.title = input.title().to_string();
        note.content = input.content().map(String::from);
        note.updated_at = notes_core::next_updated_at(note.updated_at);
        Ok(note.clone())
    }

    async fn delete(&self, owner: &OwnerId, id: NoteId) -> StoreResult<()> {
        let mut state = self.lock();
        Self::owned(&mut state, owner, id)?;
        state.notes.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
        let mut state = self.lock();
        if state.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken(user.username.clone()));
        }
        if state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::EmailTaken(user.email.clone()));
        }

        let created = User {
            id: UserId::new(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: notes_core::now(),
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<User> {
        self.lock()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        Ok(self.lock().users.values().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self.lock().users.values().any(|u| u.email == email))
    }
}
