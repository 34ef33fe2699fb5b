/// Filesystem primitives used by the orchestrator
use std::fs;
use std::io;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;

use super::overwrite::Overwriter;

/// The OS calls a deletion run needs.
///
/// Kept narrow so a run can be driven against a scripted backend in tests.
pub trait FileOps: Send + Sync {
    /// True when something (file, directory or link) exists at `path`
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    /// Drop the read-only attribute so the file can be overwritten
    fn clear_readonly(&self, path: &Path) -> io::Result<()>;

    /// Zero-fill file content, returning the bytes destroyed
    fn overwrite(&self, path: &Path) -> Result<u64>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// `std::fs` backed implementation
#[derive(Debug, Clone, Default)]
pub struct NativeFileOps {
    overwriter: Overwriter,
}

impl NativeFileOps {
    pub fn new(overwriter: Overwriter) -> Self {
        Self { overwriter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Overwriter::from_config(config))
    }
}

impl FileOps for NativeFileOps {
    fn clear_readonly(&self, path: &Path) -> io::Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.file_type().is_symlink() {
            return Ok(());
        }

        let mut permissions = metadata.permissions();
        if !permissions.readonly() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            permissions.set_mode(permissions.mode() | 0o200);
        }

        #[cfg(not(unix))]
        {
            permissions.set_readonly(false);
        }

        fs::set_permissions(path, permissions)
    }

    fn overwrite(&self, path: &Path) -> Result<u64> {
        self.overwriter.overwrite(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}
