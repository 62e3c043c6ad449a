//! Application state shared across handlers.

use std::sync::Arc;

use notes_store::{NoteRepository, UserRepository};

use crate::auth::{Passwords, TokenIssuer};
use crate::config::{IdentityMode, ServerConfig};

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Note storage.
    notes: Arc<dyn NoteRepository>,
    /// Credential storage.
    users: Arc<dyn UserRepository>,
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Present only in token mode.
    tokens: Option<Arc<TokenIssuer>>,
    /// Password hashing.
    passwords: Passwords,
}

impl AppState {
    /// Create new application state over a single backend that stores both
    /// notes and users.
    pub fn new<S>(store: S, config: ServerConfig) -> Self
    where
        S: NoteRepository + UserRepository + 'static,
    {
        let store = Arc::new(store);
        Self::with_repositories(store.clone(), store, config)
    }

    /// Create application state from separate repositories.
    pub fn with_repositories(
        notes: Arc<dyn NoteRepository>,
        users: Arc<dyn UserRepository>,
        config: ServerConfig,
    ) -> Self {
        let tokens = match &config.identity {
            IdentityMode::Token(jwt) => Some(Arc::new(TokenIssuer::new(jwt))),
            IdentityMode::Header => None,
        };

        Self {
            notes,
            users,
            config: Arc::new(config),
            tokens,
            passwords: Passwords::default(),
        }
    }

    /// Replace the password hasher, e.g. with cheaper parameters in tests.
    pub fn with_passwords(mut self, passwords: Passwords) -> Self {
        self.passwords = passwords;
        self
    }

    /// Get a reference to the note repository.
    pub fn notes(&self) -> &dyn NoteRepository {
        self.notes.as_ref()
    }

    /// Get a reference to the user repository.
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The token issuer, if the server runs in token mode.
    pub fn tokens(&self) -> Option<&TokenIssuer> {
        self.tokens.as_deref()
    }

    pub fn passwords(&self) -> &Passwords {
        &self.passwords
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
