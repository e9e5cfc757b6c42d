//! Investor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fundline_core::persona::InvestorAttributes;
use fundline_core::types::{DbId, Timestamp};

/// An investor row from the `investors` table.
///
/// The monetary fields are nullable on purpose: aggregation coerces dirty
/// or missing values to zero instead of failing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Investor {
    pub id: DbId,
    pub name: String,
    pub investor_type: Option<String>,
    pub nationality: Option<String>,
    pub sector: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub investment_size: Option<f64>,
    pub investment_size_currency: Option<String>,
    pub expected_ticket_amount: Option<f64>,
    pub expected_ticket_currency: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Investor {
    /// Project the scorable attribute subset for persona matching.
    pub fn attributes(&self) -> InvestorAttributes {
        InvestorAttributes {
            investor_type: self.investor_type.clone(),
            nationality: self.nationality.clone(),
            sector: self.sector.clone(),
            gender: self.gender.clone(),
            age: self.age,
        }
    }
}

/// DTO for creating a new investor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvestor {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub investor_type: Option<String>,
    pub nationality: Option<String>,
    pub sector: Option<String>,
    pub gender: Option<String>,
    #[validate(range(min = 0, max = 130))]
    pub age: Option<i32>,
    pub investment_size: Option<f64>,
    pub investment_size_currency: Option<String>,
    pub expected_ticket_amount: Option<f64>,
    pub expected_ticket_currency: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// DTO for updating an existing investor. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInvestor {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub investor_type: Option<String>,
    pub nationality: Option<String>,
    pub sector: Option<String>,
    pub gender: Option<String>,
    #[validate(range(min = 0, max = 130))]
    pub age: Option<i32>,
    pub investment_size: Option<f64>,
    pub investment_size_currency: Option<String>,
    pub expected_ticket_amount: Option<f64>,
    pub expected_ticket_currency: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}
