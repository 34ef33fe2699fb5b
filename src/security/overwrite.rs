/// Secure overwrite: zero-fill a file in place before it is removed
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Seek, SeekFrom, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};

/// Single-pass zero overwrite with a small local retry budget
#[derive(Debug, Clone)]
pub struct Overwriter {
    chunk_size: usize,
    attempts: u32,
    retry_pause: Duration,
}

impl Overwriter {
    pub fn new(chunk_size: usize, attempts: u32, retry_pause: Duration) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            attempts: attempts.max(1),
            retry_pause,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.chunk_size,
            config.overwrite_attempts,
            config.retry_pause(),
        )
    }

    /// Overwrite every byte of `path` with zeros.
    ///
    /// Returns the number of bytes destroyed. Symlinks are left alone (`Ok(0)`).
    /// When the file cannot be opened or written after all attempts the result is
    /// `Error::Locked`, which the orchestrator turns into a lock conflict.
    pub fn overwrite(&self, path: &Path) -> Result<u64> {
        match fs::symlink_metadata(path) {
            Ok(metadata) if metadata.file_type().is_symlink() => return Ok(0),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::Missing(path.to_path_buf()));
            }
            Err(e) => return Err(Error::io(path, e)),
        }

        let mut last_error = io::Error::other("overwrite was not attempted");
        for attempt in 1..=self.attempts {
            match self.zero_fill(path) {
                Ok(size) => return Ok(size),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(Error::Missing(path.to_path_buf()));
                }
                Err(e) => {
                    debug!(
                        "overwrite attempt {}/{} on {} failed: {}",
                        attempt,
                        self.attempts,
                        path.display(),
                        e
                    );
                    last_error = e;
                    if attempt < self.attempts {
                        thread::sleep(self.retry_pause);
                    }
                }
            }
        }

        Err(Error::locked(path, last_error))
    }

    fn zero_fill(&self, path: &Path) -> io::Result<u64> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;
        let file_size = file.metadata()?.len();
        file.seek(SeekFrom::Start(0))?;

        let buffer = vec![0u8; self.chunk_size];
        let mut remaining = file_size;

        while remaining > 0 {
            let write_size = remaining.min(buffer.len() as u64) as usize;
            file.write_all(&buffer[..write_size])?;
            remaining -= write_size as u64;
        }

        file.sync_all()?;
        Ok(file_size)
    }
}

impl Default for Overwriter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
