//! Handlers for the `/funds` resource, including the capital overview.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use fundline_core::capital::{self, Alert, FundCapital};
use fundline_core::error::CoreError;
use fundline_core::types::DbId;
use fundline_db::models::fund::{CreateFund, Fund, UpdateFund};
use fundline_db::repositories::FundRepo;

use crate::engine::snapshot::load_fund_snapshot;
use crate::error::{validate_input, AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/funds
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFund>,
) -> AppResult<(StatusCode, Json<Fund>)> {
    validate_input(&input)?;
    let fund = FundRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(fund)))
}

/// GET /api/v1/funds
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Fund>>> {
    let funds = FundRepo::list(&state.pool).await?;
    Ok(Json(funds))
}

/// GET /api/v1/funds/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Fund>> {
    let fund = FundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fund", id }))?;
    Ok(Json(fund))
}

/// PUT /api/v1/funds/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFund>,
) -> AppResult<Json<Fund>> {
    validate_input(&input)?;
    let fund = FundRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fund", id }))?;
    Ok(Json(fund))
}

/// DELETE /api/v1/funds/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = FundRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Fund", id }))
    }
}

/// Capital position of one fund plus target progress and alerts.
#[derive(Debug, Serialize)]
pub struct CapitalOverview {
    pub fund_id: DbId,
    pub fund_name: String,
    pub currency: String,
    pub target_raise: Option<f64>,
    pub percent_of_goal: f64,
    /// Days until the fund's target date; negative when past due.
    pub days_remaining: Option<i64>,
    pub average_deployed: f64,
    #[serde(flatten)]
    pub capital: FundCapital,
    pub alerts: Vec<Alert>,
}

/// GET /api/v1/funds/{id}/capital-overview
pub async fn capital_overview(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CapitalOverview>>> {
    let fund = FundRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Fund", id }))?;

    let snapshot = load_fund_snapshot(&state.pool, id).await?;
    let capital = capital::classify_fund(&snapshot);
    let now = Utc::now();

    let overview = CapitalOverview {
        fund_id: fund.id,
        fund_name: fund.name,
        currency: fund.currency,
        target_raise: fund.target_raise,
        percent_of_goal: capital::percent_of_goal(capital.deployed, fund.target_raise),
        days_remaining: fund
            .target_date
            .map(|date| (date - now.date_naive()).num_days()),
        average_deployed: capital.average_deployed(),
        alerts: capital::alerts(&capital, fund.target_raise, now),
        capital,
    };

    Ok(Json(DataResponse { data: overview }))
}
