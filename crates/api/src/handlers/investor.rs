//! Handlers for the `/investors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use fundline_core::error::CoreError;
use fundline_core::types::DbId;
use fundline_db::models::investor::{CreateInvestor, Investor, UpdateInvestor};
use fundline_db::repositories::InvestorRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/investors
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInvestor>,
) -> AppResult<(StatusCode, Json<Investor>)> {
    validate_input(&input)?;
    let investor = InvestorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(investor)))
}

/// GET /api/v1/investors
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Investor>>> {
    let investors = InvestorRepo::list(&state.pool).await?;
    Ok(Json(investors))
}

/// GET /api/v1/investors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Investor>> {
    let investor = InvestorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id,
        }))?;
    Ok(Json(investor))
}

/// PUT /api/v1/investors/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvestor>,
) -> AppResult<Json<Investor>> {
    validate_input(&input)?;
    let investor = InvestorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id,
        }))?;
    Ok(Json(investor))
}

/// DELETE /api/v1/investors/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = InvestorRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id,
        }))
    }
}
