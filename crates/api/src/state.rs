use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::task_generator::TaskGenerator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fundline_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<fundline_events::EventBus>,
    /// Stage-entry checklist generator (holds the checklist table).
    pub task_generator: Arc<TaskGenerator>,
    /// Generative-assistant client; `None` runs deterministic-only scoring.
    pub assistant: Option<Arc<fundline_assistant::AssistantClient>>,
}
