//! Server-side engine pieces: stage-entry checklist generation and the
//! fund capital snapshot loader.

pub mod snapshot;
pub mod task_generator;
