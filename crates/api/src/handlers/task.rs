//! Handlers for task routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use fundline_core::error::CoreError;
use fundline_core::types::DbId;
use fundline_db::models::task::{CreateTask, Task, UpdateTask};
use fundline_db::repositories::{FundRepo, InvestorRepo, TaskRepo};

use crate::error::{validate_input, AppError, AppResult};
use crate::state::AppState;

/// Query parameters for the task list.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default)]
    pub include_completed: bool,
}

/// A task plus its computed overdue flag.
#[derive(Debug, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub is_overdue: bool,
}

fn view(task: Task) -> TaskView {
    let is_overdue = task.is_overdue(Utc::now().date_naive());
    TaskView { task, is_overdue }
}

/// GET /api/v1/funds/{fund_id}/tasks
pub async fn list_by_fund(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
    Query(query): Query<ListTasksQuery>,
) -> AppResult<Json<Vec<TaskView>>> {
    FundRepo::find_by_id(&state.pool, fund_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fund",
            id: fund_id,
        }))?;
    let tasks = TaskRepo::list_by_fund(&state.pool, fund_id, query.include_completed).await?;
    Ok(Json(tasks.into_iter().map(view).collect()))
}

/// POST /api/v1/funds/{fund_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskView>)> {
    validate_input(&input)?;
    FundRepo::find_by_id(&state.pool, fund_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fund",
            id: fund_id,
        }))?;

    // Denormalize the investor name at creation time.
    let investor_name = match input.investor_id {
        Some(investor_id) => InvestorRepo::find_by_id(&state.pool, investor_id)
            .await?
            .map(|i| i.name),
        None => None,
    };

    let task = TaskRepo::create(&state.pool, fund_id, &input, investor_name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(view(task))))
}

/// PUT /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskView>> {
    validate_input(&input)?;

    let investor_name = match input.investor_id {
        Some(investor_id) => InvestorRepo::find_by_id(&state.pool, investor_id)
            .await?
            .map(|i| i.name),
        None => None,
    };

    let task = TaskRepo::update(&state.pool, id, &input, investor_name.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(view(task)))
}

/// PUT /api/v1/tasks/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskView>> {
    let task = TaskRepo::set_status(&state.pool, id, "completed")
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(view(task)))
}

/// PUT /api/v1/tasks/{id}/reopen
pub async fn reopen(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskView>> {
    let task = TaskRepo::set_status(&state.pool, id, "open")
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(view(task)))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
