//! Account routes: register, login, me.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use notes_core::UserProfile;
use serde::Deserialize;

use crate::accounts::{self, AuthSession};
use crate::error::ApiResult;
use crate::extract::AuthenticatedUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Missing fields deserialize as empty and are reported by validation.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthSession>>)> {
    let Json(request) = payload?;
    let session =
        accounts::register(&state, &request.username, &request.email, request.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(session, "User registered successfully")),
    ))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<AuthSession>>> {
    let Json(request) = payload?;
    let session = accounts::login(&state, &request.username, request.password).await?;

    Ok(Json(ApiResponse::with_message(session, "Login successful")))
}

/// GET /api/auth/me - current user info.
async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<UserProfile>>> {
    let profile = accounts::profile(&state, user.user_id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialize() {
        let json = r#"{"username": "alice", "email": "alice@example.com", "password": "secret123"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.email, "alice@example.com");
        assert_eq!(request.password, "secret123");
    }

    #[test]
    fn test_login_request_missing_fields_default_empty() {
        let request: LoginRequest = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(request.username, "alice");
        assert!(request.password.is_empty());
    }
}
