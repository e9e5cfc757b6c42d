//! Route definitions for the `/tasks` resource.
//!
//! Task listing and creation are fund-scoped and live under
//! `/funds/{fund_id}/tasks`.

use axum::routing::put;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// PUT    /{id}/complete    -> complete
/// PUT    /{id}/reopen      -> reopen
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(task::update).delete(task::delete))
        .route("/{id}/complete", put(task::complete))
        .route("/{id}/reopen", put(task::reopen))
}
