//! API error types with JSON responses.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_core::FieldErrors;
use notes_store::StoreError;
use serde::Serialize;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid caller identity (401).
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Duplicate username or email (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Request data failed validation (400).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Target does not exist for this caller (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Infrastructure failure (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_field("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_field("query", rejection.body_text())
    }
}

impl ApiError {
    /// Validation failure on a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::default();
        errors.add(field, message);
        Self::Validation(errors)
    }

    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Store(e) if e.is_not_found() => "NOT_FOUND",
            Self::Store(e) if e.is_conflict() => "CONFLICT",
            Self::Store(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Store(e) if e.is_conflict() => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller. Infrastructure details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Unauthenticated(msg) | Self::Conflict(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Validation(_) => "Invalid request data".to_string(),
            Self::Store(StoreError::NoteNotFound(_)) => "Note not found".to_string(),
            Self::Store(StoreError::UserNotFound(_)) => "User not found".to_string(),
            Self::Store(StoreError::UsernameTaken(_)) => "Username already exists".to_string(),
            Self::Store(StoreError::EmailTaken(_)) => "Email already exists".to_string(),
            Self::Internal(_) | Self::Store(_) => "An unexpected error occurred".to_string(),
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "VALIDATION_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let fields = match &self {
            Self::Validation(errors) => Some(errors.fields().clone()),
            _ => None,
        };
        let body = ErrorResponse {
            success: false,
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.public_message(),
                fields,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
