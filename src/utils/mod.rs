/// Utility module - Process and platform helpers
pub mod platform;
pub mod process;

pub use platform::{LockRegistry, lock_registry};
pub use process::{process_exists, process_name};
