//! notes-server: HTTP API server for the notes service
//!
//! This crate provides:
//! - REST endpoints for owner-scoped note CRUD with search, sort and pagination
//! - Account registration and login with Argon2 password hashes and JWT tokens
//! - Caller identity resolution (bearer token or `X-User-Id` header)
//! - A uniform JSON envelope for successes and errors
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{AppState, ServerConfig, routes};
//! use notes_store::MemoryStore;
//!
//! let config = ServerConfig::from_env()?;
//! let app = routes::build_router(AppState::new(MemoryStore::new(), config));
//! ```

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, IdentityMode, JwtConfig, ServerConfig, StorageBackend};
pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
