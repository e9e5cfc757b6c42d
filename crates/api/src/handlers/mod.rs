pub mod dashboard;
pub mod fund;
pub mod investor;
pub mod persona;
pub mod pipeline;
pub mod stage;
pub mod task;
