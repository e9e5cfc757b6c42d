//! Handlers for persona routes: CRUD plus the match/suggest scoring
//! endpoints.
//!
//! Scoring prefers the generative assistant when configured, and falls
//! back to the deterministic rule scorer on any assistant failure. The
//! caller only ever sees a `method` marker, never the failure.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use fundline_assistant::AssistantClient;
use fundline_core::error::CoreError;
use fundline_core::persona::{self, PersonaSuggestion};
use fundline_core::types::DbId;
use fundline_db::models::investor::Investor;
use fundline_db::models::persona::{CreatePersona, Persona, UpdatePersona};
use fundline_db::repositories::{FundRepo, InvestorRepo, PersonaRepo};

use crate::error::{validate_input, AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn require_fund(state: &AppState, fund_id: DbId) -> AppResult<()> {
    FundRepo::find_by_id(&state.pool, fund_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fund",
            id: fund_id,
        }))?;
    Ok(())
}

/// GET /api/v1/funds/{fund_id}/personas
pub async fn list(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
) -> AppResult<Json<Vec<Persona>>> {
    require_fund(&state, fund_id).await?;
    let personas = PersonaRepo::list_by_fund(&state.pool, fund_id).await?;
    Ok(Json(personas))
}

/// POST /api/v1/funds/{fund_id}/personas
pub async fn create(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
    Json(input): Json<CreatePersona>,
) -> AppResult<(StatusCode, Json<Persona>)> {
    validate_input(&input)?;
    require_fund(&state, fund_id).await?;
    let persona = PersonaRepo::create(&state.pool, fund_id, &input).await?;
    Ok((StatusCode::CREATED, Json(persona)))
}

/// PUT /api/v1/funds/{fund_id}/personas/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((fund_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePersona>,
) -> AppResult<Json<Persona>> {
    validate_input(&input)?;
    let persona = PersonaRepo::update(&state.pool, fund_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Persona",
            id,
        }))?;
    Ok(Json(persona))
}

/// DELETE /api/v1/funds/{fund_id}/personas/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((fund_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = PersonaRepo::delete(&state.pool, fund_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Persona",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// Request body for the match endpoint.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub investor_id: DbId,
}

/// One scored persona in the match response.
#[derive(Debug, Serialize)]
pub struct PersonaMatch {
    pub persona_id: DbId,
    pub persona_name: String,
    pub score: u8,
    pub matched_attributes: Vec<String>,
    pub gap_attributes: Vec<String>,
    pub reasoning: Option<String>,
}

/// Match response: scores sorted descending plus the method marker.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    /// `assistant` or `rule_based`.
    pub method: &'static str,
    pub matches: Vec<PersonaMatch>,
}

/// POST /api/v1/funds/{fund_id}/personas/match
pub async fn match_investor(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
    Json(input): Json<MatchRequest>,
) -> AppResult<Json<DataResponse<MatchResponse>>> {
    require_fund(&state, fund_id).await?;
    let investor = InvestorRepo::find_by_id(&state.pool, input.investor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id: input.investor_id,
        }))?;
    let personas = PersonaRepo::list_by_fund(&state.pool, fund_id).await?;

    if personas.is_empty() {
        return Ok(Json(DataResponse {
            data: MatchResponse {
                method: "rule_based",
                matches: Vec::new(),
            },
        }));
    }

    if let Some(assistant) = &state.assistant {
        match assistant_match(assistant, &investor, &personas).await {
            Ok(mut matches) => {
                matches.sort_by(|a, b| b.score.cmp(&a.score));
                return Ok(Json(DataResponse {
                    data: MatchResponse {
                        method: "assistant",
                        matches,
                    },
                }));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Assistant match failed, using rule-based scoring");
            }
        }
    }

    let attributes = investor.attributes();
    let mut matches: Vec<PersonaMatch> = personas
        .iter()
        .map(|p| {
            let result = persona::score(&attributes, &p.targets());
            PersonaMatch {
                persona_id: p.id,
                persona_name: p.name.clone(),
                score: result.score,
                matched_attributes: result
                    .matched_fields
                    .into_iter()
                    .map(String::from)
                    .collect(),
                gap_attributes: result
                    .unmatched_fields
                    .into_iter()
                    .map(String::from)
                    .collect(),
                reasoning: None,
            }
        })
        .collect();
    matches.sort_by(|a, b| b.score.cmp(&a.score));

    Ok(Json(DataResponse {
        data: MatchResponse {
            method: "rule_based",
            matches,
        },
    }))
}

/// Run the assistant path: one batched call scoring all personas.
async fn assistant_match(
    assistant: &AssistantClient,
    investor: &Investor,
    personas: &[Persona],
) -> Result<Vec<PersonaMatch>, fundline_assistant::AssistantError> {
    let investor_summary = serde_json::json!({
        "name": investor.name,
        "investor_type": investor.investor_type,
        "nationality": investor.nationality,
        "sector": investor.sector,
        "gender": investor.gender,
        "age": investor.age,
    });
    let persona_summaries: Vec<serde_json::Value> = personas
        .iter()
        .map(|p| {
            serde_json::json!({
                "persona_id": p.id,
                "name": p.name,
                "target_investor_type": p.target_investor_type,
                "target_gender": p.target_gender,
                "target_age_min": p.target_age_min,
                "target_nationalities": p.target_nationalities,
                "target_sectors": p.target_sectors,
            })
        })
        .collect();

    let scored = assistant
        .score_personas(&investor_summary, &serde_json::Value::Array(persona_summaries))
        .await?;

    // Join assistant scores back to persona names; unknown ids are
    // dropped rather than trusted.
    let matches = scored
        .into_iter()
        .filter_map(|m| {
            let persona = personas.iter().find(|p| p.id == m.persona_id)?;
            Some(PersonaMatch {
                persona_id: m.persona_id,
                persona_name: persona.name.clone(),
                score: m.score.min(100),
                matched_attributes: m.matched_attributes,
                gap_attributes: m.gap_attributes,
                reasoning: m.reasoning,
            })
        })
        .collect();
    Ok(matches)
}

// ---------------------------------------------------------------------------
// Suggest
// ---------------------------------------------------------------------------

/// Suggest response: candidate personas plus the method marker.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    /// `assistant` or `rule_based`.
    pub method: &'static str,
    pub suggestions: Vec<PersonaSuggestion>,
}

/// POST /api/v1/funds/{fund_id}/personas/suggest
///
/// Looks at the fund's pipeline investors whose best score against every
/// persona is below the ceiling, and proposes personas covering them.
pub async fn suggest(
    State(state): State<AppState>,
    Path(fund_id): Path<DbId>,
) -> AppResult<Json<DataResponse<SuggestResponse>>> {
    require_fund(&state, fund_id).await?;
    let personas = PersonaRepo::list_by_fund(&state.pool, fund_id).await?;
    let targets: Vec<_> = personas.iter().map(|p| p.targets()).collect();

    let investors = InvestorRepo::list_in_fund_pipeline(&state.pool, fund_id).await?;
    let unmatched: Vec<(String, fundline_core::persona::InvestorAttributes)> = investors
        .iter()
        .filter_map(|i| {
            let attributes = i.attributes();
            persona::is_poorly_matched(&attributes, &targets)
                .then(|| (i.name.clone(), attributes))
        })
        .collect();

    if unmatched.is_empty() {
        return Ok(Json(DataResponse {
            data: SuggestResponse {
                method: "rule_based",
                suggestions: Vec::new(),
            },
        }));
    }

    if let Some(assistant) = &state.assistant {
        match assistant_suggest(assistant, &unmatched).await {
            Ok(suggestions) => {
                return Ok(Json(DataResponse {
                    data: SuggestResponse {
                        method: "assistant",
                        suggestions,
                    },
                }));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Assistant suggest failed, using rule-based clusters");
            }
        }
    }

    Ok(Json(DataResponse {
        data: SuggestResponse {
            method: "rule_based",
            suggestions: persona::cluster_unmatched(&unmatched),
        },
    }))
}

/// Run the assistant suggestion path over the poorly matched set.
async fn assistant_suggest(
    assistant: &AssistantClient,
    unmatched: &[(String, fundline_core::persona::InvestorAttributes)],
) -> Result<Vec<PersonaSuggestion>, fundline_assistant::AssistantError> {
    let summaries: Vec<serde_json::Value> = unmatched
        .iter()
        .map(|(name, attributes)| {
            serde_json::json!({
                "name": name,
                "investor_type": attributes.investor_type,
                "nationality": attributes.nationality,
                "sector": attributes.sector,
                "gender": attributes.gender,
                "age": attributes.age,
            })
        })
        .collect();

    let proposed = assistant
        .suggest_personas(&serde_json::Value::Array(summaries))
        .await?;

    Ok(proposed
        .into_iter()
        .map(|s| PersonaSuggestion {
            suggested_name: s.suggested_name,
            description: s.description,
            target_investor_type: s.target_investor_type,
            target_nationalities: s.target_nationalities,
            target_sectors: s.target_sectors,
            count: 0,
            example_investors: Vec::new(),
        })
        .collect())
}
