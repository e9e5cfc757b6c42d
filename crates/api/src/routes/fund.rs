//! Route definitions for the `/funds` resource.
//!
//! Also nests stage, pipeline, task, and persona routes under
//! `/funds/{fund_id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{fund, persona, pipeline, stage, task};
use crate::state::AppState;

/// Routes mounted at `/funds`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// GET    /{id}/capital-overview             -> capital_overview
///
/// GET    /{fund_id}/stages                  -> list_or_seed
/// POST   /{fund_id}/stages                  -> create
///
/// GET    /{fund_id}/pipeline                -> list_by_fund
///
/// GET    /{fund_id}/tasks                   -> list_by_fund
/// POST   /{fund_id}/tasks                   -> create
///
/// GET    /{fund_id}/personas                -> list
/// POST   /{fund_id}/personas                -> create
/// PUT    /{fund_id}/personas/{id}           -> update
/// DELETE /{fund_id}/personas/{id}           -> delete
/// POST   /{fund_id}/personas/match          -> match_investor
/// POST   /{fund_id}/personas/suggest        -> suggest
/// ```
pub fn router() -> Router<AppState> {
    let persona_routes = Router::new()
        .route("/", get(persona::list).post(persona::create))
        .route("/{id}", put(persona::update).delete(persona::delete))
        .route("/match", post(persona::match_investor))
        .route("/suggest", post(persona::suggest));

    Router::new()
        .route("/", get(fund::list).post(fund::create))
        .route(
            "/{id}",
            get(fund::get_by_id).put(fund::update).delete(fund::delete),
        )
        .route("/{id}/capital-overview", get(fund::capital_overview))
        .route(
            "/{fund_id}/stages",
            get(stage::list_or_seed).post(stage::create),
        )
        .route("/{fund_id}/pipeline", get(pipeline::list_by_fund))
        .route(
            "/{fund_id}/tasks",
            get(task::list_by_fund).post(task::create),
        )
        .nest("/{fund_id}/personas", persona_routes)
}
