//! Note routes: owner-scoped CRUD with search, sort and pagination.
//!
//! - GET /api/notes - List the caller's notes
//! - POST /api/notes - Create a note
//! - GET /api/notes/{id} - Read one note
//! - PUT /api/notes/{id} - Overwrite title and content
//! - DELETE /api/notes/{id} - Delete a note
//!
//! Every handler takes [`CallerIdentity`] first, so a request without a
//! resolvable owner never reaches the store.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use notes_core::{Note, NoteId, NoteInput, NoteQuery, Pagination, SortDirection, SortField};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::CallerIdentity;
use crate::response::ApiResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query string for GET /api/notes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    #[serde(alias = "sortDir")]
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListNotesQuery {
    /// Resolve into a store query. Sort values are lenient; pagination is not.
    pub fn to_note_query(&self) -> Result<NoteQuery, ApiError> {
        let mut query = NoteQuery::new().sort(
            SortField::parse_lenient(self.sort_by.as_deref()),
            SortDirection::parse_lenient(self.sort_order.as_deref()),
        );
        if let Some(term) = &self.search {
            query = query.search(term.as_str());
        }
        if let Some(pagination) = Pagination::from_parts(self.page, self.page_size)? {
            query = query.paginate(pagination);
        }
        Ok(query)
    }
}

/// Response for GET /api/notes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
    /// Matches for the search filter, ignoring pagination.
    pub total_count: u64,
    /// Echo of the requested page, if any.
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Request body for POST and PUT.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteRequest {
    fn into_input(self) -> Result<NoteInput, ApiError> {
        Ok(NoteInput::new(&self.title, self.content)?)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a path id. Malformed ids are indistinguishable from missing notes.
fn parse_note_id(raw: &str) -> ApiResult<NoteId> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("Note not found".to_string()))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/notes
///
/// # Response
///
/// - 200 OK: `{ "notes": [...], "totalCount", "page", "pageSize" }`
/// - 400 Bad Request: page or pageSize below 1, or pageSize above the cap
/// - 401 Unauthorized: no caller identity
async fn list_notes(
    CallerIdentity(owner): CallerIdentity,
    State(state): State<AppState>,
    params: Result<Query<ListNotesQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<ListNotesResponse>>> {
    let Query(params) = params?;
    let query = params.to_note_query()?;

    let notes = state.notes().list(&owner, &query).await?;
    let total_count = state.notes().count(&owner, query.search_term()).await?;

    tracing::debug!(
        owner_id = %owner,
        returned = notes.len(),
        total_count,
        "Listed notes"
    );

    Ok(Json(ApiResponse::ok(ListNotesResponse {
        notes,
        total_count,
        page: params.page,
        page_size: params.page_size,
    })))
}

/// GET /api/notes/{id}
async fn get_note(
    CallerIdentity(owner): CallerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Note>>> {
    let id = parse_note_id(&id)?;
    let note = state.notes().get(&owner, id).await?;
    Ok(Json(ApiResponse::ok(note)))
}

/// POST /api/notes
async fn create_note(
    CallerIdentity(owner): CallerIdentity,
    State(state): State<AppState>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Note>>)> {
    let Json(request) = payload?;
    let input = request.into_input()?;

    let note = state.notes().create(&owner, &input).await?;
    tracing::info!(note_id = %note.id, owner_id = %owner, "Note created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(note, "Note created successfully")),
    ))
}

/// PUT /api/notes/{id}
async fn update_note(
    CallerIdentity(owner): CallerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Note>>> {
    let id = parse_note_id(&id)?;
    let Json(request) = payload?;
    let input = request.into_input()?;

    let note = state.notes().update(&owner, id, &input).await?;
    tracing::info!(note_id = %note.id, owner_id = %owner, "Note updated");

    Ok(Json(ApiResponse::with_message(note, "Note updated successfully")))
}

/// DELETE /api/notes/{id}
async fn delete_note(
    CallerIdentity(owner): CallerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_note_id(&id)?;
    state.notes().delete(&owner, id).await?;
    tracing::info!(note_id = %id, owner_id = %owner, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}
