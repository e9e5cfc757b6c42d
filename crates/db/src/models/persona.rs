//! Persona entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use fundline_core::persona::PersonaTargets;
use fundline_core::types::{DbId, Timestamp};

/// A persona row from the `personas` table: a fund-scoped target-investor
/// archetype. Any targeting field may be unset, meaning "no constraint on
/// this attribute" for scoring.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Persona {
    pub id: DbId,
    pub fund_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub target_investor_type: Option<String>,
    pub target_gender: Option<String>,
    pub target_age_min: Option<i32>,
    pub target_nationalities: Vec<String>,
    pub target_sectors: Vec<String>,
    pub professional_goals: Option<String>,
    pub professional_frustrations: Option<String>,
    pub why_invest: Option<String>,
    pub decision_making_process: Option<String>,
    pub min_ticket_size: Option<f64>,
    pub max_ticket_size: Option<f64>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Persona {
    /// Project the scorable target subset for rule-based matching.
    pub fn targets(&self) -> PersonaTargets {
        PersonaTargets {
            investor_type: self.target_investor_type.clone(),
            gender: self.target_gender.clone(),
            age_min: self.target_age_min,
            nationalities: self.target_nationalities.clone(),
            sectors: self.target_sectors.clone(),
        }
    }
}

/// DTO for creating a new persona.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePersona {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub target_investor_type: Option<String>,
    pub target_gender: Option<String>,
    #[validate(range(min = 0, max = 130))]
    pub target_age_min: Option<i32>,
    #[serde(default)]
    pub target_nationalities: Vec<String>,
    #[serde(default)]
    pub target_sectors: Vec<String>,
    pub professional_goals: Option<String>,
    pub professional_frustrations: Option<String>,
    pub why_invest: Option<String>,
    pub decision_making_process: Option<String>,
    pub min_ticket_size: Option<f64>,
    pub max_ticket_size: Option<f64>,
    pub actor_id: Option<DbId>,
}

/// DTO for updating an existing persona. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePersona {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_investor_type: Option<String>,
    pub target_gender: Option<String>,
    #[validate(range(min = 0, max = 130))]
    pub target_age_min: Option<i32>,
    pub target_nationalities: Option<Vec<String>>,
    pub target_sectors: Option<Vec<String>>,
    pub professional_goals: Option<String>,
    pub professional_frustrations: Option<String>,
    pub why_invest: Option<String>,
    pub decision_making_process: Option<String>,
    pub min_ticket_size: Option<f64>,
    pub max_ticket_size: Option<f64>,
}
