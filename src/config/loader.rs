/// Configuration loader
use super::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config location: `<executable>.config` next to the binary
/// (e.g. "shredder.config")
pub fn default_config_path() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    Some(PathBuf::from(format!("{}.config", exe_path.display())))
}

/// Load configuration from the adjacent .config file.
/// A missing file is not an error: defaults are used instead.
pub fn load_config() -> Result<Config> {
    match default_config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Load configuration from an explicit path (must exist)
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content)
}

/// Parse and validate a JSON config document
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}
