//! Handlers for the dashboard aggregation routes.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use fundline_core::capital::{self, Alert, PlatformCapital};
use fundline_core::types::DbId;
use fundline_db::models::fund::Fund;
use fundline_db::repositories::{FundRepo, InvestorRepo};

use crate::engine::snapshot::load_fund_snapshot;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Platform-wide dashboard counters and capital totals.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_funds: i64,
    pub active_funds: i64,
    pub total_investors: i64,
    #[serde(flatten)]
    pub capital: PlatformCapital,
}

/// GET /api/v1/dashboard/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let total_funds = FundRepo::count(&state.pool).await?;
    let active_funds = FundRepo::count_active(&state.pool).await?;
    let total_investors = InvestorRepo::count(&state.pool).await?;

    let funds = FundRepo::list(&state.pool).await?;
    let mut per_fund = Vec::with_capacity(funds.len());
    for fund in &funds {
        let snapshot = load_fund_snapshot(&state.pool, fund.id).await?;
        per_fund.push(capital::classify_fund(&snapshot));
    }
    let capital = capital::platform_totals(&per_fund);

    Ok(Json(DataResponse {
        data: DashboardStats {
            total_funds,
            active_funds,
            total_investors,
            capital,
        },
    }))
}

/// Per-fund performance line for the dashboard, sorted by deployed
/// capital descending.
#[derive(Debug, Serialize)]
pub struct FundPerformance {
    pub fund_id: DbId,
    pub fund_name: String,
    pub status: String,
    pub target_raise: Option<f64>,
    pub deployed: f64,
    pub potential: f64,
    pub final_stage: f64,
    pub percent_of_goal: f64,
    pub investor_count: usize,
    pub alerts: Vec<Alert>,
}

/// GET /api/v1/dashboard/fund-performance
pub async fn fund_performance(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<FundPerformance>>>> {
    let funds = FundRepo::list(&state.pool).await?;
    let now = Utc::now();

    let mut lines = Vec::with_capacity(funds.len());
    for fund in funds {
        lines.push(performance_line(&state, fund, now).await?);
    }
    lines.sort_by(|a, b| b.deployed.total_cmp(&a.deployed));

    Ok(Json(DataResponse { data: lines }))
}

async fn performance_line(
    state: &AppState,
    fund: Fund,
    now: fundline_core::types::Timestamp,
) -> AppResult<FundPerformance> {
    let snapshot = load_fund_snapshot(&state.pool, fund.id).await?;
    let capital = capital::classify_fund(&snapshot);

    Ok(FundPerformance {
        fund_id: fund.id,
        fund_name: fund.name,
        status: fund.status,
        target_raise: fund.target_raise,
        percent_of_goal: capital::percent_of_goal(capital.deployed, fund.target_raise),
        investor_count: snapshot.len(),
        alerts: capital::alerts(&capital, fund.target_raise, now),
        deployed: capital.deployed,
        potential: capital.potential,
        final_stage: capital.final_stage,
    })
}
