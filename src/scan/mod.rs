/// Scan module - Expand user roots into an ordered deletion batch
pub mod batch;
pub mod entry;
pub mod walker;

pub use batch::build_batch;
pub use entry::{DeletionBatch, EntryKind, PathEntry};
pub use walker::enumerate;
