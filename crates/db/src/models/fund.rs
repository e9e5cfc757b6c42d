//! Fund entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fundline_core::types::{DbId, Timestamp};

/// A fund row from the `funds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fund {
    pub id: DbId,
    pub name: String,
    pub currency: String,
    pub target_raise: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new fund.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFund {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Defaults to USD if omitted.
    pub currency: Option<String>,
    pub target_raise: Option<f64>,
    pub target_date: Option<NaiveDate>,
    /// Defaults to Active if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing fund. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFund {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub currency: Option<String>,
    pub target_raise: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub status: Option<String>,
}
