/// Configuration schema for the shredder engine
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "none"];

/// Tunables for overwrite, retry and traversal behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Size of each zero block written during overwrite (bytes)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// How many times the overwriter opens + writes a file before giving up
    #[serde(default = "default_attempts")]
    pub overwrite_attempts: u32,

    /// Pause between overwrite attempts (milliseconds)
    #[serde(default = "default_interval_ms")]
    pub retry_pause_ms: u64,

    /// Upper bound on how long the orchestrator sleeps between decision checks
    /// while a conflict is pending (milliseconds)
    #[serde(default = "default_interval_ms")]
    pub conflict_poll_ms: u64,

    /// Directories nested deeper than this are reported but not descended into
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Log level: "trace", "debug", "info", "warn", "error", "none"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_chunk_size() -> usize {
    1024 * 1024
}

fn default_attempts() -> u32 {
    3
}

fn default_interval_ms() -> u64 {
    1_000
}

fn default_max_depth() -> usize {
    512
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overwrite_attempts: default_attempts(),
            retry_pause_ms: default_interval_ms(),
            conflict_poll_ms: default_interval_ms(),
            max_depth: default_max_depth(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.retry_pause_ms)
    }

    pub fn conflict_poll(&self) -> Duration {
        Duration::from_millis(self.conflict_poll_ms)
    }

    /// Filter string for env_logger, `None` when logging is switched off
    pub fn log_filter(&self) -> Option<&str> {
        match self.log_level.as_str() {
            "none" => None,
            level => Some(level),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::invalid("chunk_size must be greater than zero"));
        }

        if self.overwrite_attempts == 0 {
            return Err(Error::invalid("overwrite_attempts must be at least 1"));
        }

        if self.max_depth == 0 {
            return Err(Error::invalid("max_depth must be at least 1"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::invalid(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }
}
