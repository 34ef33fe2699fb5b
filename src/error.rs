/// Error type shared by the scanner, overwriter and config loader
use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Plain I/O failure on a path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File could not be opened or written after all attempts.
    /// Usually another process holds it open; the caller escalates this to a lock conflict.
    #[error("{path} is locked or inaccessible: {source}")]
    Locked {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path disappeared before it could be processed
    #[error("{0} does not exist")]
    Missing(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A background worker could not be spawned or panicked
    #[error("{0} worker failed")]
    Worker(&'static str),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn locked(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Locked {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
