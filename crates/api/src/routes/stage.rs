//! Route definitions for the `/stages` resource.
//!
//! Stage listing and creation are fund-scoped and live under
//! `/funds/{fund_id}/stages`.

use axum::routing::put;
use axum::Router;

use crate::handlers::stage;
use crate::state::AppState;

/// Routes mounted at `/stages`.
///
/// ```text
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete (409 while pipeline entries reference it)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(stage::update).delete(stage::delete))
}
