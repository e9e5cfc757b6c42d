use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stage deletion blocked because pipeline entries still reference it.
    /// The caller must move those investors to another stage first.
    #[error("Cannot delete stage {stage_id} with {investor_count} investors. Move them first.")]
    StageInUse {
        stage_id: DbId,
        investor_count: i64,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
