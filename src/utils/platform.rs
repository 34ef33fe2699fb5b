/// Platform-specific capabilities
///
/// Which mechanism (if any) this build uses to discover processes that hold a
/// file open.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockRegistry {
    /// Windows Restart Manager sessions
    RestartManager,
    /// Linux `/proc/<pid>/fd` links
    Procfs,
    /// No lock discovery; conflicts can only be skipped or retried blindly
    Unsupported,
}

/// Detect the lock registry available on the current platform
pub fn lock_registry() -> LockRegistry {
    #[cfg(windows)]
    return LockRegistry::RestartManager;

    #[cfg(target_os = "linux")]
    return LockRegistry::Procfs;

    #[cfg(not(any(windows, target_os = "linux")))]
    return LockRegistry::Unsupported;
}

impl LockRegistry {
    pub fn name(&self) -> &'static str {
        match self {
            LockRegistry::RestartManager => "restart-manager",
            LockRegistry::Procfs => "procfs",
            LockRegistry::Unsupported => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lock_registry() {
        let registry = lock_registry();
        println!("Detected lock registry: {}", registry.name());

        #[cfg(target_os = "linux")]
        assert_eq!(registry, LockRegistry::Procfs);

        #[cfg(windows)]
        assert_eq!(registry, LockRegistry::RestartManager);
    }
}
