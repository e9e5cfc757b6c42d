//! Route definitions for the `/pipeline` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::pipeline;
use crate::state::AppState;

/// Routes mounted at `/pipeline`.
///
/// ```text
/// PUT    /move                        -> move_investor (only generation trigger)
/// GET    /investors/{investor_id}     -> investor_status
/// PUT    /{id}                        -> update_entry (field edits only)
/// DELETE /{id}                        -> delete_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/move", put(pipeline::move_investor))
        .route("/investors/{investor_id}", get(pipeline::investor_status))
        .route(
            "/{id}",
            put(pipeline::update_entry).delete(pipeline::delete_entry),
        )
}
