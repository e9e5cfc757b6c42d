//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Pipeline handlers publish [`PlatformEvent`]s (stage entries being the
//! main source) and the persistence worker subscribes to write them to
//! the `events` table. The bus is shared as `Arc<EventBus>` through
//! application state.

use chrono::{DateTime, Utc};
use fundline_core::types::DbId;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// One domain event from the pipeline engine.
///
/// Built with [`PlatformEvent::new`] plus the `with_*` methods; only the
/// event type is mandatory. The stage-entered event, for example, carries
/// the investor as source, the moving user as actor, and the stage and
/// task-generation outcome in the payload.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"investor.stage_entered"`.
    pub event_type: String,

    /// Entity kind the event is about (e.g. `"investor"`).
    pub source_entity_type: Option<String>,

    /// Database id of the source entity.
    pub source_entity_id: Option<DbId>,

    /// User that triggered the event, when known.
    pub actor_user_id: Option<DbId>,

    /// Event-specific JSON payload.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Create an event with only its type set; the payload starts as an
    /// empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the entity this event is about.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Attach the acting user.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Replace the payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Broadcast buffer size. Sized so the persistence worker falling behind
/// under burst load drops the oldest events rather than blocking
/// publishers.
const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out hub: every subscriber independently receives every event
/// published after it subscribed.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with an explicit channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed events are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Publishing is fire-and-forget: with zero subscribers the event is
    /// dropped, which is the normal state in tests and during startup
    /// before the persistence worker attaches.
    pub fn publish(&self, event: PlatformEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
