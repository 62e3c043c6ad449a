//! Route definitions for the HTTP API.

pub mod auth;
pub mod health;
pub mod notes;

use axum::Router;

use crate::config::IdentityMode;
use crate::state::AppState;

/// Build the complete router with all routes.
///
/// Account routes exist only in token mode; a header-mode server has no
/// credentials to check.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(health::routes())
        .merge(notes::routes());

    if matches!(state.config().identity, IdentityMode::Token(_)) {
        router = router.merge(auth::routes());
    }

    router.with_state(state)
}
