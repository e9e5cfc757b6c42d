//! Handlers for pipeline stage routes.
//!
//! Listing a fund's stages seeds the canonical default set on first
//! access; deletion is blocked while any pipeline entry references the
//! stage.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use fundline_core::error::CoreError;
use fundline_core::types::DbId;
use fundline_db::models::stage::{CreateStage, PipelineStage, UpdateStage};
use fundline_db::repositories::{FundRepo, PipelineRepo, StageRepo};

use crate::error::{validate_input, AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/funds/{fund_id}/stages
pub async fn list_or_seed(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
) -> AppResult<Json<Vec<PipelineStage>>> {
    FundRepo::find_by_id(&state.pool, fund_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fund",
            id: fund_id,
        }))?;
    let stages = StageRepo::list_or_seed(&state.pool, fund_id).await?;
    Ok(Json(stages))
}

/// POST /api/v1/funds/{fund_id}/stages
pub async fn create(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
    Json(input): Json<CreateStage>,
) -> AppResult<(StatusCode, Json<PipelineStage>)> {
    validate_input(&input)?;
    FundRepo::find_by_id(&state.pool, fund_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fund",
            id: fund_id,
        }))?;
    let stage = StageRepo::create(&state.pool, fund_id, &input.name).await?;
    Ok((StatusCode::CREATED, Json(stage)))
}

/// PUT /api/v1/stages/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStage>,
) -> AppResult<Json<PipelineStage>> {
    validate_input(&input)?;
    let stage = StageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Stage", id }))?;
    Ok(Json(stage))
}

/// DELETE /api/v1/stages/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let investor_count = PipelineRepo::count_by_stage(&state.pool, id).await?;
    if investor_count > 0 {
        return Err(AppError::Core(CoreError::StageInUse {
            stage_id: id,
            investor_count,
        }));
    }

    let deleted = StageRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Stage", id }))
    }
}
