//! Fund capital snapshot assembly.
//!
//! Joins a fund's pipeline entries with stage names and investor monetary
//! fields into the [`EntryCapital`] inputs the pure capital classifier
//! consumes.

use std::collections::HashMap;

use sqlx::PgPool;

use fundline_core::capital::EntryCapital;
use fundline_core::types::DbId;
use fundline_db::repositories::{InvestorRepo, PipelineRepo, StageRepo};

/// Load the classifier inputs for one fund.
///
/// Entries referencing an unknown stage or investor (mid-delete races)
/// are skipped rather than failing the whole snapshot.
pub async fn load_fund_snapshot(
    pool: &PgPool,
    fund_id: DbId,
) -> Result<Vec<EntryCapital>, sqlx::Error> {
    let stages = StageRepo::list_by_fund(pool, fund_id).await?;
    let stage_names: HashMap<DbId, String> =
        stages.into_iter().map(|s| (s.id, s.name)).collect();

    let investors = InvestorRepo::list_in_fund_pipeline(pool, fund_id).await?;
    let investors: HashMap<DbId, _> = investors.into_iter().map(|i| (i.id, i)).collect();

    let entries = PipelineRepo::list_by_fund(pool, fund_id).await?;

    let snapshot = entries
        .into_iter()
        .filter_map(|entry| {
            let stage_name = stage_names.get(&entry.stage_id)?;
            let investor = investors.get(&entry.investor_id)?;
            Some(EntryCapital {
                investor_id: investor.id,
                investor_name: investor.name.clone(),
                investor_type: investor.investor_type.clone(),
                stage_name: stage_name.clone(),
                stage_entered_at: entry.stage_entered_at,
                investment_size: investor.investment_size,
                expected_ticket_amount: investor.expected_ticket_amount,
            })
        })
        .collect();

    Ok(snapshot)
}
