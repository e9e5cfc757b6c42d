//! Fundline event bus and audit infrastructure.
//!
//! Building blocks for the application-wide event system:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.

pub mod bus;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use persistence::EventPersistence;
