/// Security module - Secure overwrite, lock discovery and process termination
pub mod file_ops;
pub mod lock_finder;
pub mod overwrite;
pub mod terminate;

pub use file_ops::{FileOps, NativeFileOps};
pub use lock_finder::{LockResolver, SystemLockResolver, looks_locked};
pub use overwrite::Overwriter;
pub use terminate::terminate_process;
