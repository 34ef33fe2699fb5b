/// Shredder - secure deletion engine
///
/// Expands user-selected roots into a batch of paths, zero-fills every file,
/// removes files then directories, and when another process holds a path open
/// waits for the caller to skip it or terminate the holder.
pub mod config;
pub mod error;
pub mod execution;
pub mod scan;
pub mod security;
pub mod state;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
pub use execution::{DeletionHandle, Orchestrator, RunSummary, ScanHandle, Shredder};
pub use scan::{DeletionBatch, EntryKind, PathEntry, build_batch, enumerate};
pub use security::{FileOps, LockResolver, NativeFileOps, Overwriter, SystemLockResolver};
pub use state::{ConflictAction, LockConflict, ProcessId, Progress, RunState};
