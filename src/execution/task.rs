/// Background tasks: scan and deletion run on worker threads, the caller polls
/// the returned handles (or the progress surface) without blocking.
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info};

use super::orchestrator::{Orchestrator, RunSummary};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::scan::{DeletionBatch, build_batch};
use crate::security::{FileOps, LockResolver, NativeFileOps, SystemLockResolver};
use crate::state::Progress;

/// Entry point for callers: owns the shared progress surface and the backends
pub struct Shredder {
    config: Config,
    progress: Arc<Progress>,
    files: Arc<dyn FileOps>,
    resolver: Arc<dyn LockResolver>,
}

impl Shredder {
    /// Native filesystem and the platform lock registry
    pub fn new(config: Config) -> Self {
        let files = Arc::new(NativeFileOps::from_config(&config));
        Self::with_backends(config, files, Arc::new(SystemLockResolver))
    }

    pub fn with_backends(
        config: Config,
        files: Arc<dyn FileOps>,
        resolver: Arc<dyn LockResolver>,
    ) -> Self {
        Self {
            config,
            progress: Arc::new(Progress::new()),
            files,
            resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared progress surface, for polling and for routing decisions
    pub fn progress(&self) -> Arc<Progress> {
        Arc::clone(&self.progress)
    }

    /// Expand `roots` into a deletion batch on a worker thread
    pub fn begin_enumeration(&self, roots: Vec<PathBuf>) -> Result<ScanHandle> {
        let progress = Arc::clone(&self.progress);
        let max_depth = self.config.max_depth;

        let handle = thread::Builder::new()
            .name("shredder-scan".to_string())
            .spawn(move || {
                debug!("🔍 Scanning {} roots", roots.len());
                let batch = build_batch(&roots, &progress, max_depth);
                progress.clear_latest_scanned();
                info!("🔍 Scan found {} paths", batch.len());
                batch
            })
            .map_err(|_| Error::Worker("scan"))?;

        Ok(ScanHandle { handle })
    }

    /// Start deleting `batch` on a worker thread.
    ///
    /// The progress surface is reset before this returns, so a decision set
    /// right afterwards (e.g. a pre-chosen "always skip") applies to this run.
    pub fn begin_deletion(&self, batch: DeletionBatch) -> Result<DeletionHandle> {
        let orchestrator = Orchestrator::from_config(
            &self.config,
            Arc::clone(&self.progress),
            Arc::clone(&self.files),
            Arc::clone(&self.resolver),
        );
        self.progress.begin_run(batch.len());

        let handle = thread::Builder::new()
            .name("shredder-delete".to_string())
            .spawn(move || orchestrator.execute(batch))
            .map_err(|_| Error::Worker("deletion"))?;

        Ok(DeletionHandle { handle })
    }
}

/// Pending scan
pub struct ScanHandle {
    handle: JoinHandle<DeletionBatch>,
}

impl ScanHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the batch
    pub fn join(self) -> Result<DeletionBatch> {
        self.handle.join().map_err(|_| Error::Worker("scan"))
    }
}

/// Pending deletion run
pub struct DeletionHandle {
    handle: JoinHandle<RunSummary>,
}

impl DeletionHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<RunSummary> {
        self.handle.join().map_err(|_| Error::Worker("deletion"))
    }
}
