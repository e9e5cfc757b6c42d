//! Response envelope for aggregate endpoints.
//!
//! CRUD handlers return entities bare; computed views (capital overview,
//! dashboard, persona match/suggest) wrap their payload in a
//! `{ "data": ... }` envelope so derived result sets are distinguishable
//! from stored rows.

use serde::Serialize;

/// Typed `{ "data": T }` envelope, preferred over ad-hoc
/// `serde_json::json!` wrapping in handlers.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
