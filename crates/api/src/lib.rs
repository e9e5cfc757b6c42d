//! Fundline HTTP API.
//!
//! Axum surface over the pipeline engine: CRUD for funds, investors,
//! stages, tasks and personas, the pipeline move endpoint (the only
//! trigger for checklist generation), capital aggregation views, and the
//! persona match/suggest endpoints.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
