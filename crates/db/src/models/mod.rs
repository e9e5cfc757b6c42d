pub mod event;
pub mod fund;
pub mod investor;
pub mod persona;
pub mod pipeline_entry;
pub mod stage;
pub mod task;
