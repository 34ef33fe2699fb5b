/// Configuration module - Load and validate shredder configuration
pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_from, parse_config};
pub use schema::Config;
