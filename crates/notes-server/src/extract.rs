//! Caller identity extraction from a JWT Bearer token or the X-User-Id header.
//!
//! Which source is consulted is decided by [`IdentityMode`] at startup, never
//! per request: a token-mode server ignores `X-User-Id` and a header-mode
//! server ignores `Authorization`.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use notes_core::{OwnerId, UserId};

use crate::auth::Claims;
use crate::config::IdentityMode;
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller id in header mode.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The owner every note operation in this request is scoped to.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub OwnerId);

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.config().identity {
            IdentityMode::Token(_) => {
                let claims = claims_from_bearer(parts, state)?;
                Ok(CallerIdentity(claims.owner_id()?))
            }
            IdentityMode::Header => owner_from_header(parts).map(CallerIdentity),
        }
    }
}

/// A caller holding a valid token, for account endpoints.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_bearer(parts, state)?;
        Ok(AuthenticatedUser {
            user_id: claims.user_id()?,
            claims,
        })
    }
}

fn claims_from_bearer(parts: &Parts, state: &AppState) -> Result<Claims, ApiError> {
    let tokens = state
        .tokens()
        .ok_or_else(|| ApiError::Unauthenticated("Token authentication is disabled".into()))?;

    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthenticated("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| {
            ApiError::Unauthenticated("Authorization header contains invalid characters".into())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthenticated("Authorization header must be Bearer <token>".to_string())
    })?;

    tokens.verify(token.trim())
}

fn owner_from_header(parts: &Parts) -> Result<OwnerId, ApiError> {
    let value = parts
        .headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| ApiError::Unauthenticated(format!("Missing {} header", USER_ID_HEADER)))?;

    let raw = value.to_str().map_err(|_| {
        ApiError::Unauthenticated(format!("{} header contains invalid characters", USER_ID_HEADER))
    })?;

    let owner = OwnerId::new(raw).map_err(|e| {
        ApiError::Unauthenticated(format!("Invalid {} header: {}", USER_ID_HEADER, e))
    })?;
    tracing::debug!(owner_id = %owner, "Using identity from X-User-Id header");
    Ok(owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use notes_store::MemoryStore;

    use crate::config::{JwtConfig, ServerConfig, StorageBackend};

    fn config(identity: IdentityMode) -> ServerConfig {
        ServerConfig {
            storage: StorageBackend::Memory,
            port: 0,
            log_level: "info".into(),
            cors_allowed_origins: "*".into(),
            identity,
        }
    }

    fn token_state() -> AppState {
        AppState::new(
            MemoryStore::new(),
            config(IdentityMode::Token(JwtConfig {
                secret: "extract-test-secret-extract-test-secret".into(),
                issuer: "notes-api".into(),
                expiry_minutes: 5,
            })),
        )
    }

    fn header_state() -> AppState {
        AppState::new(MemoryStore::new(), config(IdentityMode::Header))
    }

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/api/notes");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_header_mode_uses_trimmed_header() {
        let state = header_state();
        let mut parts = parts(&[(USER_ID_HEADER, "  user-1 ")]);
        let CallerIdentity(owner) = CallerIdentity::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(owner.as_str(), "user-1");
    }

    #[tokio::test]
    async fn test_header_mode_rejects_missing_or_blank() {
        let state = header_state();
        for headers in [vec![], vec![(USER_ID_HEADER, "   ")]] {
            let mut parts = parts(&headers);
            let result = CallerIdentity::from_request_parts(&mut parts, &state).await;
            assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
        }
    }

    #[tokio::test]
    async fn test_header_mode_ignores_bearer_token() {
        let state = header_state();
        let mut parts = parts(&[("Authorization", "Bearer whatever")]);
        let result = CallerIdentity::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_token_mode_ignores_user_id_header() {
        let state = token_state();
        let mut parts = parts(&[(USER_ID_HEADER, "user-1")]);
        let result = CallerIdentity::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_token_mode_resolves_subject() {
        let state = token_state();
        let user = notes_core::User {
            id: UserId::new(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            created_at: notes_core::now(),
        };
        let token = state.tokens().unwrap().issue(&user).unwrap().token;
        let bearer = format!("Bearer {}", token);

        let mut parts = parts(&[("Authorization", bearer.as_str())]);
        let CallerIdentity(owner) = CallerIdentity::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(owner, user.id.owner_id());

        let authed = AuthenticatedUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(authed.user_id, user.id);
    }

    #[tokio::test]
    async fn test_token_mode_rejects_wrong_scheme() {
        let state = token_state();
        let mut parts = parts(&[("Authorization", "Basic dXNlcjpwYXNz")]);
        let result = CallerIdentity::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }
}
