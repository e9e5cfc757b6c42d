//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod fund_repo;
pub mod investor_repo;
pub mod persona_repo;
pub mod pipeline_repo;
pub mod stage_repo;
pub mod task_repo;

pub use event_repo::EventRepo;
pub use fund_repo::FundRepo;
pub use investor_repo::InvestorRepo;
pub use persona_repo::PersonaRepo;
pub use pipeline_repo::PipelineRepo;
pub use stage_repo::StageRepo;
pub use task_repo::TaskRepo;
