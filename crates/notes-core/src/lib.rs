//! notes-core: Core types for the notes service
//!
//! This crate provides:
//! - ID types (`NoteId`, `UserId`) and the caller identity (`OwnerId`)
//! - The `Note` and `User` records shared by the store and the server
//! - Listing parameters (search, sort allow-list, pagination)
//! - Input validation for notes and account registration

pub mod identity;
pub mod query;
pub mod types;
pub mod validation;

pub use identity::{OwnerId, OwnerIdError, MAX_OWNER_ID_LEN};
pub use query::{NoteQuery, Pagination, SortDirection, SortField, MAX_PAGE_SIZE};
pub use types::{Note, NoteId, User, UserId, UserProfile, next_updated_at, now};
pub use validation::{
    FieldErrors, NoteInput, Registration, MAX_CONTENT_LEN, MAX_EMAIL_LEN, MAX_TITLE_LEN,
    MAX_USERNAME_LEN, MIN_PASSWORD_LEN, MIN_USERNAME_LEN,
};
