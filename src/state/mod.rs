/// State module - Progress surface shared between workers and the UI loop
pub mod decision;
pub mod progress;

pub use decision::{ConflictAction, DecisionSlot};
pub use progress::{LockConflict, ProcessId, Progress, RunState};
