//! Account service: registration and login.
//!
//! Validation runs before any store access. Password hashing and
//! verification are CPU-bound and run on the blocking pool.

use notes_core::{Registration, User, UserProfile};
use notes_store::{NewUser, StoreError};
use serde::Serialize;

use crate::auth::{IssuedToken, Passwords};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// A user together with a freshly issued token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl AuthSession {
    fn new(user: &User, issued: IssuedToken) -> Self {
        Self {
            user: user.profile(),
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

/// Create an account and sign the new user in.
pub async fn register(
    state: &AppState,
    username: &str,
    email: &str,
    password: String,
) -> ApiResult<AuthSession> {
    let registration = Registration::new(username, email, password)?;
    let tokens = state
        .tokens()
        .ok_or_else(|| ApiError::Internal("Token issuer not configured".into()))?;

    let users = state.users();
    if users.username_exists(registration.username()).await? {
        return Err(ApiError::Conflict("Username already exists".into()));
    }
    if users.email_exists(registration.email()).await? {
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    let password_hash = hash_blocking(
        state.passwords().clone(),
        registration.password().to_string(),
    )
    .await?;
    let user = users
        .create_user(&NewUser::new(
            registration.username(),
            registration.email(),
            password_hash,
        ))
        .await?;

    let issued = tokens.issue(&user)?;
    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok(AuthSession::new(&user, issued))
}

/// Check credentials and issue a token.
///
/// Unknown usernames and wrong passwords fail identically.
pub async fn login(state: &AppState, username: &str, password: String) -> ApiResult<AuthSession> {
    let tokens = state
        .tokens()
        .ok_or_else(|| ApiError::Internal("Token issuer not configured".into()))?;

    let user = state
        .users()
        .find_by_username(username.trim())
        .await?
        .ok_or_else(|| ApiError::Unauthenticated(INVALID_CREDENTIALS.to_string()))?;

    let valid =
        verify_blocking(state.passwords().clone(), password, user.password_hash.clone()).await?;
    if !valid {
        tracing::debug!(username = %user.username, "Login rejected");
        return Err(ApiError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
    }

    let issued = tokens.issue(&user)?;
    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
    Ok(AuthSession::new(&user, issued))
}

/// Public profile of the signed-in user.
pub async fn profile(state: &AppState, user_id: notes_core::UserId) -> ApiResult<UserProfile> {
    match state.users().find_by_id(user_id).await {
        Ok(user) => Ok(user.profile()),
        // A valid token for a user that no longer exists.
        Err(StoreError::UserNotFound(_)) => {
            Err(ApiError::Unauthenticated("User no longer exists".into()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn hash_blocking(passwords: Passwords, password: String) -> ApiResult<String> {
    tokio::task::spawn_blocking(move || passwords.hash(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))?
}

async fn verify_blocking(passwords: Passwords, password: String, hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("Password verification task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_store::{MemoryStore, UserRepository};

    use crate::config::{IdentityMode, JwtConfig, ServerConfig, StorageBackend};

    fn state() -> (AppState, MemoryStore) {
        let store = MemoryStore::new();
        let config = ServerConfig {
            storage: StorageBackend::Memory,
            port: 0,
            log_level: "info".into(),
            cors_allowed_origins: "*".into(),
            identity: IdentityMode::Token(JwtConfig {
                secret: "accounts-test-secret-accounts-test".into(),
                issuer: "notes-api".into(),
                expiry_minutes: 5,
            }),
        };
        let state = AppState::new(store.clone(), config)
            .with_passwords(Passwords::with_cost(1024, 1, 1).unwrap());
        (state, store)
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_issues_token() {
        let (state, store) = state();
        let session = register(&state, "alice", "Alice@Example.com", "password123".into())
            .await
            .unwrap();

        assert_eq!(session.user.username, "alice");
        assert_eq!(session.user.email, "alice@example.com");

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "password123");
        assert!(stored.password_hash.starts_with("$argon2"));

        let claims = state.tokens().unwrap().verify(&session.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), stored.id);
    }

    #[tokio::test]
    async fn test_register_conflicts() {
        let (state, _) = state();
        register(&state, "alice", "alice@example.com", "password123".into())
            .await
            .unwrap();

        let err = register(&state, "alice", "other@example.com", "password123".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Username already exists"));

        let err = register(&state, "bob", "ALICE@example.com", "password123".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Email already exists"));
    }

    #[tokio::test]
    async fn test_register_validation_precedes_store() {
        let (state, store) = state();
        let err = register(&state, "x", "nope", "short".into()).await.unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert!(fields.fields().contains_key("username"));
                assert!(fields.fields().contains_key("email"));
                assert!(fields.fields().contains_key("password"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!store.username_exists("x").await.unwrap());
    }

    #[tokio::test]
    async fn test_login_same_error_for_unknown_user_and_bad_password() {
        let (state, _) = state();
        register(&state, "alice", "alice@example.com", "password123".into())
            .await
            .unwrap();

        let unknown = login(&state, "mallory", "password123".into()).await.unwrap_err();
        let wrong = login(&state, "alice", "password124".into()).await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(wrong, ApiError::Unauthenticated(_)));

        let session = login(&state, "alice", "password123".into()).await.unwrap();
        assert_eq!(session.user.username, "alice");
    }

    #[tokio::test]
    async fn test_profile_of_missing_user_is_unauthenticated() {
        let (state, _) = state();
        let err = profile(&state, notes_core::UserId::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }
}
