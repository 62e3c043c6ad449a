//! notes-store: Storage layer for the notes service
//!
//! This crate provides:
//! - `NoteRepository` / `UserRepository`: the owner-scoped storage contract
//! - `PgStore`: PostgreSQL implementation via sqlx
//! - `MemoryStore`: in-process implementation for tests and local runs
//! - SQL construction for filtered, sorted, paginated listings
//! - Embedded schema migration
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{NoteRepository, PgStore, StoreConfig};
//!
//! let store = PgStore::connect(StoreConfig::from_env()?).await?;
//! let note = store.create(&owner, &NoteInput::new("Groceries", None)?).await?;
//! let notes = store.list(&owner, &NoteQuery::new().search("milk")).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod query;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::{NewUser, NoteRow, UserRow};
pub use repository::{NoteRepository, UserRepository};
pub use store::{PgStore, StoreConfig};

// Re-export notes-core for downstream crates
pub use notes_core;
