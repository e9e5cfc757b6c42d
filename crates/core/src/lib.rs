//! Pure domain logic for the Fundline investor pipeline.
//!
//! This crate holds everything that can be computed without touching the
//! database or the network:
//!
//! - [`stages`] — the canonical default pipeline stage set.
//! - [`checklist`] — per-stage auto-task templates and due-day offsets.
//! - [`pipeline`] — move semantics for pipeline entries.
//! - [`capital`] — capital bucket classification and fund aggregates.
//! - [`persona`] — weighted rule-based persona match scoring.

pub mod capital;
pub mod checklist;
pub mod error;
pub mod persona;
pub mod pipeline;
pub mod stages;
pub mod types;

pub use error::CoreError;
