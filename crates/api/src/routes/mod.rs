pub mod dashboard;
pub mod fund;
pub mod health;
pub mod investor;
pub mod pipeline;
pub mod stage;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /funds                                   list, create
/// /funds/{id}                              get, update, delete
/// /funds/{id}/capital-overview             capital buckets + alerts (GET)
/// /funds/{fund_id}/stages                  list-or-seed, create
/// /funds/{fund_id}/pipeline                fund pipeline entries (GET)
/// /funds/{fund_id}/tasks                   list, create
/// /funds/{fund_id}/personas                list, create
/// /funds/{fund_id}/personas/{id}           update, delete
/// /funds/{fund_id}/personas/match          score one investor (POST)
/// /funds/{fund_id}/personas/suggest        propose personas (POST)
///
/// /investors                               list, create
/// /investors/{id}                          get, update, delete
///
/// /stages/{id}                             update, delete
///
/// /pipeline/move                           move investor (PUT)
/// /pipeline/investors/{investor_id}        current stage + dwell (GET)
/// /pipeline/{id}                           field edits (PUT), delete
///
/// /tasks/{id}                              update, delete
/// /tasks/{id}/complete                     complete (PUT)
/// /tasks/{id}/reopen                       reopen (PUT)
///
/// /dashboard/stats                         platform counters (GET)
/// /dashboard/fund-performance              per-fund snapshot (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/funds", fund::router())
        .nest("/investors", investor::router())
        .nest("/stages", stage::router())
        .nest("/pipeline", pipeline::router())
        .nest("/tasks", task::router())
        .nest("/dashboard", dashboard::router())
}
