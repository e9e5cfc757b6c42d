//! Route definitions for the `/investors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::investor;
use crate::state::AppState;

/// Routes mounted at `/investors`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(investor::list).post(investor::create))
        .route(
            "/{id}",
            get(investor::get_by_id)
                .put(investor::update)
                .delete(investor::delete),
        )
}
