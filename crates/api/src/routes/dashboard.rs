//! Route definitions for the `/dashboard` aggregation views.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats               -> platform counters + capital totals
/// GET /fund-performance    -> per-fund snapshot, deployed desc
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/fund-performance", get(dashboard::fund_performance))
}
