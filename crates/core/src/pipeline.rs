//! Move semantics for pipeline entries.
//!
//! A pipeline entry is the single source of truth for "what stage is this
//! investor in" within one fund. The rules for what a move request means —
//! create, stage change, or a position-only reshuffle — are pure and live
//! here so the timestamp-refresh behaviour is unit-testable.

use crate::types::{DbId, Timestamp};

/// What a move request should do to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAction {
    /// No entry exists yet: insert one with a fresh `stage_entered_at`,
    /// then fire stage-entry task generation.
    Create,
    /// The entry exists and the target stage differs: update stage and
    /// position, refresh `stage_entered_at`, fire task generation.
    ChangeStage { previous_stage_id: DbId },
    /// The entry exists and the target stage is unchanged: update the
    /// intra-stage position only. `stage_entered_at` is untouched and no
    /// tasks are generated.
    PositionOnly,
}

impl MoveAction {
    /// Whether this action counts as entering a stage (and therefore
    /// triggers checklist generation and a stage-entered event).
    pub fn enters_stage(self) -> bool {
        !matches!(self, Self::PositionOnly)
    }
}

/// Decide what a move into `target_stage_id` means given the entry's
/// current stage (`None` when the investor is not in the pipeline yet).
pub fn decide_move(current_stage_id: Option<DbId>, target_stage_id: DbId) -> MoveAction {
    match current_stage_id {
        None => MoveAction::Create,
        Some(current) if current == target_stage_id => MoveAction::PositionOnly,
        Some(previous_stage_id) => MoveAction::ChangeStage { previous_stage_id },
    }
}

/// Whole days an entry has dwelt in its current stage.
///
/// Clamped at zero for clock skew between writer and reader.
pub fn days_in_stage(stage_entered_at: Timestamp, now: Timestamp) -> i64 {
    (now - stage_entered_at).num_days().max(0)
}
