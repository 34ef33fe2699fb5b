/// Execution module - Deletion state machine and the background tasks driving it
pub mod orchestrator;
pub mod task;

// Re-export for convenience
pub use orchestrator::{Orchestrator, RunSummary};
pub use task::{DeletionHandle, ScanHandle, Shredder};
