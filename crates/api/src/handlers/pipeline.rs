//! Handlers for pipeline ledger routes.
//!
//! `move_investor` is the only path that can trigger checklist
//! generation: a create or stage change fires the task generator and
//! publishes `investor.stage_entered`; a position-only reshuffle does
//! neither and leaves `stage_entered_at` alone.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use fundline_core::error::CoreError;
use fundline_core::pipeline::{days_in_stage, decide_move, MoveAction};
use fundline_core::types::DbId;
use fundline_db::models::pipeline_entry::{
    MoveInvestor, PipelineEntry, PipelineStatus, UpdatePipelineEntry,
};
use fundline_db::repositories::{FundRepo, InvestorRepo, PipelineRepo, StageRepo};
use fundline_events::PlatformEvent;

use crate::engine::task_generator::StageEntry;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Outcome of a move request.
#[derive(Debug, Serialize)]
pub struct MoveOutcome {
    pub entry: PipelineEntry,
    /// `created`, `stage_changed`, or `position_only`.
    pub action: &'static str,
    pub tasks_generated: u64,
}

/// PUT /api/v1/pipeline/move
pub async fn move_investor(
    State(state): State<AppState>,
    Json(input): Json<MoveInvestor>,
) -> AppResult<Json<MoveOutcome>> {
    FundRepo::find_by_id(&state.pool, input.fund_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fund",
            id: input.fund_id,
        }))?;
    let investor = InvestorRepo::find_by_id(&state.pool, input.investor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id: input.investor_id,
        }))?;
    let stage = StageRepo::find_by_id(&state.pool, input.stage_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Stage",
            id: input.stage_id,
        }))?;
    if stage.fund_id != input.fund_id {
        return Err(AppError::BadRequest(format!(
            "Stage {} belongs to a different fund",
            stage.id
        )));
    }

    let existing =
        PipelineRepo::find_by_fund_and_investor(&state.pool, input.fund_id, input.investor_id)
            .await?;

    let action = decide_move(existing.as_ref().map(|e| e.stage_id), input.stage_id);

    let (entry, action_name) = match action {
        MoveAction::Create => {
            let entry = PipelineRepo::create(
                &state.pool,
                input.fund_id,
                input.investor_id,
                input.stage_id,
                input.position,
            )
            .await?;
            (entry, "created")
        }
        MoveAction::ChangeStage { .. } => {
            let current = existing.ok_or_else(|| {
                AppError::InternalError("pipeline entry vanished during move".into())
            })?;
            let entry =
                PipelineRepo::change_stage(&state.pool, current.id, input.stage_id, input.position)
                    .await?
                    .ok_or(AppError::Core(CoreError::NotFound {
                        entity: "Pipeline entry",
                        id: current.id,
                    }))?;
            (entry, "stage_changed")
        }
        MoveAction::PositionOnly => {
            let current = existing.ok_or_else(|| {
                AppError::InternalError("pipeline entry vanished during move".into())
            })?;
            let entry = PipelineRepo::update_position(&state.pool, current.id, input.position)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Pipeline entry",
                    id: current.id,
                }))?;
            (entry, "position_only")
        }
    };

    let mut tasks_generated = 0;
    if action.enters_stage() {
        tasks_generated = state
            .task_generator
            .on_stage_entry(
                &state.pool,
                &StageEntry {
                    fund_id: input.fund_id,
                    stage_id: stage.id,
                    stage_name: stage.name.clone(),
                    investor_id: investor.id,
                    investor_name: investor.name.clone(),
                    actor_id: input.actor_id,
                },
            )
            .await?;

        let previous_stage_id = match action {
            MoveAction::ChangeStage { previous_stage_id } => Some(previous_stage_id),
            _ => None,
        };
        let mut event = PlatformEvent::new("investor.stage_entered")
            .with_source("investor", investor.id)
            .with_payload(serde_json::json!({
                "fund_id": input.fund_id,
                "stage_id": stage.id,
                "stage_name": stage.name,
                "previous_stage_id": previous_stage_id,
                "tasks_generated": tasks_generated,
            }));
        if let Some(actor_id) = input.actor_id {
            event = event.with_actor(actor_id);
        }
        state.event_bus.publish(event);
    }

    Ok(Json(MoveOutcome {
        entry,
        action: action_name,
        tasks_generated,
    }))
}

/// GET /api/v1/funds/{fund_id}/pipeline
pub async fn list_by_fund(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
) -> AppResult<Json<Vec<PipelineEntry>>> {
    FundRepo::find_by_id(&state.pool, fund_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fund",
            id: fund_id,
        }))?;
    let entries = PipelineRepo::list_by_fund(&state.pool, fund_id).await?;
    Ok(Json(entries))
}

/// GET /api/v1/pipeline/investors/{investor_id}
///
/// Current stage plus dwell time. An investor with no entry yields a
/// status of nulls rather than a 404 (profile views render "not in
/// pipeline").
pub async fn investor_status(
    State(state): State<AppState>,
    Path(investor_id): Path<DbId>,
) -> AppResult<Json<PipelineStatus>> {
    InvestorRepo::find_by_id(&state.pool, investor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id: investor_id,
        }))?;

    let Some(entry) = PipelineRepo::find_latest_by_investor(&state.pool, investor_id).await? else {
        return Ok(Json(PipelineStatus {
            investor_id,
            fund_id: None,
            stage_id: None,
            stage_name: None,
            position: 0,
            stage_entered_at: None,
            days_in_stage: None,
        }));
    };

    let stage_name = StageRepo::find_by_id(&state.pool, entry.stage_id)
        .await?
        .map(|s| s.name);

    Ok(Json(PipelineStatus {
        investor_id,
        fund_id: Some(entry.fund_id),
        stage_id: Some(entry.stage_id),
        stage_name,
        position: entry.position,
        stage_entered_at: Some(entry.stage_entered_at),
        days_in_stage: Some(days_in_stage(entry.stage_entered_at, Utc::now())),
    }))
}

/// PUT /api/v1/pipeline/{id}
///
/// Field edits only; never refreshes `stage_entered_at` and never
/// triggers generation.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePipelineEntry>,
) -> AppResult<Json<PipelineEntry>> {
    let entry = PipelineRepo::update_fields(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pipeline entry",
            id,
        }))?;
    Ok(Json(entry))
}

/// DELETE /api/v1/pipeline/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PipelineRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Pipeline entry",
            id,
        }))
    }
}
