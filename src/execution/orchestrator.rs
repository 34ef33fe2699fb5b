/// Deletion orchestrator
///
/// Two passes over a batch: every file is overwritten and removed first, then
/// every directory is removed. A failed overwrite or removal raises a lock
/// conflict and the run waits for the caller to Skip or Terminate.
use std::io::{self, ErrorKind};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::scan::{DeletionBatch, EntryKind};
use crate::security::{FileOps, LockResolver, looks_locked};
use crate::state::{ConflictAction, LockConflict, Progress};

/// How a single path ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Deleted,
    Missing,
    Skipped,
    Failed,
    Cancelled,
}

/// Result of a conflict once the caller has decided
enum Resolution<T> {
    /// Blockers were terminated and the operation retried once
    Retried(T),
    Skipped,
    Cancelled,
}

/// What happened during one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// Paths overwritten (files) and removed
    pub completed: usize,
    /// Paths left on disk by a Skip decision
    pub skipped: usize,
    /// Paths still present after Terminate + retry, and directories that
    /// could not be emptied
    pub failed: usize,
    /// Paths that were already gone
    pub missing: usize,
    pub cancelled: bool,
}

impl RunSummary {
    /// True when nothing was left behind
    pub fn all_removed(&self) -> bool {
        !self.cancelled && self.skipped == 0 && self.failed == 0
    }
}

#[derive(Debug, Default)]
struct Tally {
    completed: usize,
    skipped: usize,
    failed: usize,
    missing: usize,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Deleted => self.completed += 1,
            Outcome::Missing => self.missing += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Cancelled => {}
        }
    }
}

pub struct Orchestrator {
    progress: Arc<Progress>,
    files: Arc<dyn FileOps>,
    resolver: Arc<dyn LockResolver>,
    conflict_poll: Duration,
}

impl Orchestrator {
    pub fn new(
        progress: Arc<Progress>,
        files: Arc<dyn FileOps>,
        resolver: Arc<dyn LockResolver>,
        conflict_poll: Duration,
    ) -> Self {
        Self {
            progress,
            files,
            resolver,
            conflict_poll,
        }
    }

    pub fn from_config(
        config: &Config,
        progress: Arc<Progress>,
        files: Arc<dyn FileOps>,
        resolver: Arc<dyn LockResolver>,
    ) -> Self {
        Self::new(progress, files, resolver, config.conflict_poll())
    }

    /// Reset the progress surface and process the whole batch on this thread
    pub fn run(&self, batch: DeletionBatch) -> RunSummary {
        self.progress.begin_run(batch.len());
        self.execute(batch)
    }

    /// Process a batch whose run was already started with `Progress::begin_run`
    pub(crate) fn execute(&self, batch: DeletionBatch) -> RunSummary {
        let started_at = Local::now();
        let mut tally = Tally::default();

        info!("🔥 Shredding {} paths", batch.len());

        'passes: for kind in [EntryKind::File, EntryKind::Directory] {
            for entry in batch.entries().iter().filter(|entry| entry.kind == kind) {
                if self.progress.is_cancelled() {
                    break 'passes;
                }
                thread::yield_now();

                let outcome = match kind {
                    EntryKind::File => self.shred_file(&entry.path),
                    EntryKind::Directory => self.remove_directory(&entry.path),
                };

                if outcome == Outcome::Cancelled {
                    break 'passes;
                }
                tally.record(outcome);
            }
        }

        let cancelled = self.progress.is_cancelled();
        self.progress.finish_run();

        if cancelled {
            warn!(
                "🛑 Run cancelled after {} of {} paths",
                tally.completed,
                batch.len()
            );
        } else {
            info!(
                "✅ Run finished: {} removed, {} skipped, {} failed, {} already gone",
                tally.completed, tally.skipped, tally.failed, tally.missing
            );
        }

        RunSummary {
            started_at,
            finished_at: Local::now(),
            completed: tally.completed,
            skipped: tally.skipped,
            failed: tally.failed,
            missing: tally.missing,
            cancelled,
        }
    }

    /// Pending → Overwriting → Removing for one file
    fn shred_file(&self, path: &Path) -> Outcome {
        if !self.files.exists(path) {
            debug!("{} already gone", path.display());
            return Outcome::Missing;
        }

        if let Err(e) = self.files.clear_readonly(path) {
            debug!("could not clear read-only on {}: {}", path.display(), e);
        }

        match self.files.overwrite(path) {
            Ok(bytes) => debug!("zeroed {} bytes of {}", bytes, path.display()),
            Err(Error::Missing(_)) => return Outcome::Missing,
            Err(e) => {
                warn!("🔒 Cannot overwrite {}: {}", path.display(), e);
                // never remove content that was not destroyed
                match self.handle_conflict(path, || self.files.overwrite(path)) {
                    Resolution::Retried(Ok(_)) => {}
                    Resolution::Retried(Err(Error::Missing(_))) => return Outcome::Missing,
                    Resolution::Retried(Err(e)) => {
                        warn!("⚠️  Abandoning {}: {}", path.display(), e);
                        return Outcome::Failed;
                    }
                    Resolution::Skipped => return Outcome::Skipped,
                    Resolution::Cancelled => return Outcome::Cancelled,
                }
            }
        }

        self.remove_with(path, |p| self.files.remove_file(p))
    }

    fn remove_directory(&self, path: &Path) -> Outcome {
        if !self.files.exists(path) {
            debug!("{} already gone", path.display());
            return Outcome::Missing;
        }

        self.remove_with(path, |p| self.files.remove_dir(p))
    }

    /// Removing → Completed, or Conflict → (Skip | Terminate → one retry)
    fn remove_with(&self, path: &Path, remove: impl Fn(&Path) -> io::Result<()>) -> Outcome {
        match remove(path) {
            Ok(()) => return self.deleted(path),
            Err(e) if e.kind() == ErrorKind::NotFound => return Outcome::Missing,
            // something inside was left behind; no process to resolve
            Err(e) if e.kind() == ErrorKind::DirectoryNotEmpty => {
                warn!("⚠️  {} still has contents, leaving it", path.display());
                return Outcome::Failed;
            }
            Err(e) if looks_locked(&e) => {
                warn!("🔒 {} is in use: {}", path.display(), e);
            }
            Err(e) => warn!("⚠️  Cannot remove {}: {}", path.display(), e),
        }

        match self.handle_conflict(path, || remove(path)) {
            Resolution::Retried(Ok(())) => self.deleted(path),
            Resolution::Retried(Err(e)) if e.kind() == ErrorKind::NotFound => Outcome::Missing,
            Resolution::Retried(Err(e)) => {
                warn!("⚠️  Abandoning {}: {}", path.display(), e);
                Outcome::Failed
            }
            Resolution::Skipped => Outcome::Skipped,
            Resolution::Cancelled => Outcome::Cancelled,
        }
    }

    fn deleted(&self, path: &Path) -> Outcome {
        self.progress.mark_deleted(path);
        debug!("🗑️  {}", path.display());
        Outcome::Deleted
    }

    /// Publish the conflict, wait for a decision, apply it.
    /// `retry` runs exactly once after the blocking processes were terminated.
    fn handle_conflict<T>(&self, path: &Path, retry: impl FnOnce() -> T) -> Resolution<T> {
        let blocking = self.resolver.find_blocking_processes(path);
        self.progress.raise_conflict(LockConflict {
            path: path.to_path_buf(),
            blocking,
        });

        let resolution = match self.await_decision() {
            None => Resolution::Cancelled,
            Some(ConflictAction::Terminate) => {
                let killed = self.resolver.terminate_blocking(path);
                info!("💀 Terminated {:?} holding {}", killed, path.display());
                Resolution::Retried(retry())
            }
            Some(_) => {
                info!("⏭️  Skipping {}", path.display());
                Resolution::Skipped
            }
        };

        self.progress.clear_conflict();
        resolution
    }

    /// Block until the caller decides. `None` means the run was cancelled.
    /// No lock is held while sleeping.
    fn await_decision(&self) -> Option<ConflictAction> {
        loop {
            if self.progress.is_cancelled() {
                return None;
            }
            if let Some(action) = self.progress.decision().take() {
                return Some(action);
            }
            self.progress.decision().wait(self.conflict_poll);
            thread::yield_now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{PathEntry, build_batch};
    use crate::security::NativeFileOps;
    use crate::state::{ProcessId, RunState};
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    /// Pretend lock table: a locked path cannot be removed (or, optionally,
    /// overwritten) until its holder is terminated.
    #[derive(Default)]
    struct Locks {
        held: Mutex<HashMap<PathBuf, ProcessId>>,
        lock_overwrite: bool,
        terminated: Mutex<Vec<ProcessId>>,
        lookups: AtomicUsize,
        removals: Mutex<Vec<PathBuf>>,
        zeroed_before_removal: Mutex<Vec<bool>>,
    }

    impl Locks {
        fn hold(&self, path: &Path, pid: ProcessId) {
            self.held.lock().unwrap().insert(path.to_path_buf(), pid);
        }

        fn is_held(&self, path: &Path) -> bool {
            self.held.lock().unwrap().contains_key(path)
        }

        fn removal_attempts(&self, path: &Path) -> usize {
            self.removals
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.as_path() == path)
                .count()
        }
    }

    struct ScriptedOps {
        inner: NativeFileOps,
        locks: Arc<Locks>,
    }

    fn busy() -> io::Error {
        io::Error::from(ErrorKind::PermissionDenied)
    }

    impl FileOps for ScriptedOps {
        fn clear_readonly(&self, path: &Path) -> io::Result<()> {
            self.inner.clear_readonly(path)
        }

        fn overwrite(&self, path: &Path) -> crate::error::Result<u64> {
            if self.locks.lock_overwrite && self.locks.is_held(path) {
                return Err(Error::locked(path, busy()));
            }
            self.inner.overwrite(path)
        }

        fn remove_file(&self, path: &Path) -> io::Result<()> {
            self.locks.removals.lock().unwrap().push(path.to_path_buf());
            if self.locks.is_held(path) {
                return Err(busy());
            }
            let zeroed = fs::read(path)
                .map(|content| content.iter().all(|&b| b == 0))
                .unwrap_or(false);
            self.locks.zeroed_before_removal.lock().unwrap().push(zeroed);
            self.inner.remove_file(path)
        }

        fn remove_dir(&self, path: &Path) -> io::Result<()> {
            self.locks.removals.lock().unwrap().push(path.to_path_buf());
            if self.locks.is_held(path) {
                return Err(busy());
            }
            self.inner.remove_dir(path)
        }
    }

    struct ScriptedResolver {
        locks: Arc<Locks>,
    }

    impl LockResolver for ScriptedResolver {
        fn find_blocking_processes(&self, path: &Path) -> Vec<ProcessId> {
            self.locks.lookups.fetch_add(1, Ordering::SeqCst);
            self.locks
                .held
                .lock()
                .unwrap()
                .get(path)
                .copied()
                .into_iter()
                .collect()
        }

        fn terminate_process(&self, pid: ProcessId) {
            self.locks.terminated.lock().unwrap().push(pid);
            self.locks.held.lock().unwrap().retain(|_, holder| *holder != pid);
        }
    }

    fn orchestrator(locks: &Arc<Locks>) -> (Arc<Orchestrator>, Arc<Progress>) {
        let progress = Arc::new(Progress::new());
        let orchestrator = Orchestrator::new(
            Arc::clone(&progress),
            Arc::new(ScriptedOps {
                inner: NativeFileOps::default(),
                locks: Arc::clone(locks),
            }),
            Arc::new(ScriptedResolver {
                locks: Arc::clone(locks),
            }),
            Duration::from_millis(10),
        );
        (Arc::new(orchestrator), progress)
    }

    fn wait_until(what: &str, condition: impl Fn() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for {}", what);
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn write(path: &Path, content: &[u8]) -> PathBuf {
        fs::write(path, content).unwrap();
        path.to_path_buf()
    }

    #[test]
    fn test_end_to_end_without_locks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("t");
        fs::create_dir_all(root.join("sub")).unwrap();
        write(&root.join("a.txt"), b"0123456789");
        write(&root.join("sub/b.txt"), b"");

        let locks = Arc::new(Locks::default());
        let (orchestrator, progress) = orchestrator(&locks);
        let batch = build_batch(&[root.clone()], &progress, 64);
        assert_eq!(batch.len(), 4);

        let summary = orchestrator.run(batch);

        assert!(!root.exists());
        assert_eq!(progress.completed(), 4);
        assert_eq!(summary.completed, 4);
        assert!(summary.all_removed());
        assert!(!progress.conflict_pending());
        assert!(progress.is_finished());
        assert_eq!(progress.run_state(), RunState::Completed);
        assert_eq!(progress.latest_deleted(), Some(root));
        assert_eq!(locks.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_content_zeroed_before_removal() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.bin"), &[0xAB; 5000]);
        let b = write(&dir.path().join("b.bin"), b"plain text secret");

        let locks = Arc::new(Locks::default());
        let (orchestrator, _) = orchestrator(&locks);
        orchestrator.run(DeletionBatch::new(vec![PathEntry::file(&a), PathEntry::file(&b)]));

        assert!(!a.exists() && !b.exists());
        assert_eq!(*locks.zeroed_before_removal.lock().unwrap(), vec![true, true]);
    }

    #[test]
    fn test_missing_paths_complete_without_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let batch = DeletionBatch::new(vec![
            PathEntry::file(dir.path().join("gone.txt")),
            PathEntry::directory(dir.path().join("gone-dir")),
        ]);

        let locks = Arc::new(Locks::default());
        let (orchestrator, progress) = orchestrator(&locks);
        let summary = orchestrator.run(batch);

        assert_eq!(summary.missing, 2);
        assert_eq!(progress.completed(), 0);
        assert!(progress.is_finished());
        assert_eq!(locks.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_skip_leaves_file_and_moves_on() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.txt"), b"held open");
        let b = write(&dir.path().join("b.txt"), b"free");

        let locks = Arc::new(Locks::default());
        locks.hold(&a, 100);
        let (orchestrator, progress) = orchestrator(&locks);

        let batch = DeletionBatch::new(vec![PathEntry::file(&a), PathEntry::file(&b)]);
        let worker = {
            let orchestrator = Arc::clone(&orchestrator);
            thread::spawn(move || orchestrator.run(batch))
        };

        wait_until("conflict", || progress.conflict_pending());
        let conflict = progress.conflict().unwrap();
        assert_eq!(conflict.path, a);
        assert_eq!(conflict.blocking, vec![100]);

        progress.set_decision(ConflictAction::Skip, false);
        let summary = worker.join().unwrap();

        assert!(a.exists());
        assert!(!b.exists());
        assert_eq!(summary.skipped, 1);
        assert_eq!(progress.completed(), 1);
        assert!(!progress.conflict_pending());
        assert_eq!(progress.action(), ConflictAction::None);
        assert!(locks.terminated.lock().unwrap().is_empty());
    }

    #[test]
    fn test_terminate_without_remember_reraises_next_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.txt"), b"held by 100");
        let b = write(&dir.path().join("b.txt"), b"free");
        let c = write(&dir.path().join("c.txt"), b"held by 200");

        let locks = Arc::new(Locks::default());
        locks.hold(&a, 100);
        locks.hold(&c, 200);
        let (orchestrator, progress) = orchestrator(&locks);

        let batch = DeletionBatch::new(vec![
            PathEntry::file(&a),
            PathEntry::file(&b),
            PathEntry::file(&c),
        ]);
        let worker = {
            let orchestrator = Arc::clone(&orchestrator);
            thread::spawn(move || orchestrator.run(batch))
        };

        wait_until("first conflict", || {
            progress.conflict().is_some_and(|conflict| conflict.path == a)
        });
        progress.set_decision(ConflictAction::Terminate, false);

        wait_until("second conflict", || {
            progress.conflict().is_some_and(|conflict| conflict.path == c)
        });
        // remember was off, so the second conflict starts undecided
        assert_eq!(progress.action(), ConflictAction::None);
        assert!(!b.exists());
        progress.set_decision(ConflictAction::Skip, false);

        let summary = worker.join().unwrap();

        assert!(!a.exists());
        assert!(c.exists());
        assert_eq!(locks.removal_attempts(&a), 2);
        assert_eq!(*locks.terminated.lock().unwrap(), vec![100]);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.skipped, 1);
        assert!(!summary.all_removed());
    }

    #[test]
    fn test_remember_reuses_decision() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let a = write(&root.join("a.txt"), b"held");
        let b = write(&root.join("b.txt"), b"held too");

        let locks = Arc::new(Locks::default());
        locks.hold(&a, 100);
        locks.hold(&b, 200);
        let (orchestrator, progress) = orchestrator(&locks);

        let batch = DeletionBatch::new(vec![
            PathEntry::file(&a),
            PathEntry::file(&b),
            PathEntry::directory(&root),
        ]);
        let worker = {
            let orchestrator = Arc::clone(&orchestrator);
            thread::spawn(move || orchestrator.run(batch))
        };

        wait_until("conflict", || progress.conflict_pending());
        progress.set_decision(ConflictAction::Skip, true);
        let summary = worker.join().unwrap();

        // a and b skipped with a single decision; root cannot be emptied
        assert!(a.exists() && b.exists() && root.exists());
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(locks.lookups.load(Ordering::SeqCst), 2);
        assert_eq!(progress.action(), ConflictAction::Skip);
        assert!(progress.is_finished());
    }

    #[test]
    fn test_remembered_terminate_kills_every_holder() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.txt"), b"held");
        let b = write(&dir.path().join("b.txt"), b"held too");

        let locks = Arc::new(Locks::default());
        locks.hold(&a, 100);
        locks.hold(&b, 200);
        let (orchestrator, progress) = orchestrator(&locks);

        progress.begin_run(2);
        progress.set_decision(ConflictAction::Terminate, true);
        let summary =
            orchestrator.execute(DeletionBatch::new(vec![PathEntry::file(&a), PathEntry::file(&b)]));

        assert!(!a.exists() && !b.exists());
        assert_eq!(summary.completed, 2);
        assert_eq!(*locks.terminated.lock().unwrap(), vec![100, 200]);
    }

    #[test]
    fn test_locked_overwrite_escalates_to_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.txt"), b"cannot open me");

        let locks = Arc::new(Locks {
            lock_overwrite: true,
            ..Locks::default()
        });
        locks.hold(&a, 300);
        let (orchestrator, progress) = orchestrator(&locks);

        let worker = {
            let orchestrator = Arc::clone(&orchestrator);
            let batch = DeletionBatch::new(vec![PathEntry::file(&a)]);
            thread::spawn(move || orchestrator.run(batch))
        };

        wait_until("conflict", || progress.conflict_pending());
        // nothing may be removed while content is intact
        assert_eq!(locks.removal_attempts(&a), 0);
        progress.set_decision(ConflictAction::Terminate, false);

        let summary = worker.join().unwrap();
        assert!(!a.exists());
        assert_eq!(summary.completed, 1);
        assert_eq!(*locks.zeroed_before_removal.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_non_empty_directory_left_without_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("deep");
        fs::create_dir_all(root.join("unlisted")).unwrap();
        write(&root.join("unlisted/kept.txt"), b"not in the batch");

        let locks = Arc::new(Locks::default());
        let (orchestrator, progress) = orchestrator(&locks);
        let summary = orchestrator.run(DeletionBatch::new(vec![PathEntry::directory(&root)]));

        assert!(root.exists());
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(locks.lookups.load(Ordering::SeqCst), 0);
        assert!(!progress.conflict_pending());
        assert!(progress.is_finished());
    }

    #[test]
    fn test_repeated_conflict_on_same_path_is_a_new_question() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.txt"), b"held");

        let locks = Arc::new(Locks::default());
        locks.hold(&a, 100);
        let (orchestrator, progress) = orchestrator(&locks);

        let worker = {
            let orchestrator = Arc::clone(&orchestrator);
            let batch = DeletionBatch::new(vec![PathEntry::file(&a), PathEntry::file(&a)]);
            thread::spawn(move || orchestrator.run(batch))
        };

        wait_until("first conflict", || progress.pending_conflict().is_some());
        let (first, conflict) = progress.pending_conflict().unwrap();
        assert_eq!(conflict.path, a);
        progress.set_decision(ConflictAction::Skip, false);

        wait_until("second conflict", || {
            progress
                .pending_conflict()
                .is_some_and(|(serial, _)| serial != first)
        });
        let (_, conflict) = progress.pending_conflict().unwrap();
        assert_eq!(conflict.path, a);
        progress.set_decision(ConflictAction::Skip, false);

        let summary = worker.join().unwrap();
        assert_eq!(summary.skipped, 2);
        assert!(a.exists());
    }

    #[test]
    fn test_cancel_before_start_processes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.txt"), b"keep");

        let locks = Arc::new(Locks::default());
        let (orchestrator, progress) = orchestrator(&locks);
        progress.cancel();

        let summary = orchestrator.run(DeletionBatch::new(vec![PathEntry::file(&a)]));

        assert!(a.exists());
        assert!(summary.cancelled);
        assert_eq!(progress.completed(), 0);
        assert_eq!(progress.run_state(), RunState::Cancelled);
    }

    #[test]
    fn test_cancel_while_conflict_pending() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir.path().join("a.txt"), b"free");
        let b = write(&dir.path().join("b.txt"), b"held");
        let c = write(&dir.path().join("c.txt"), b"never reached");

        let locks = Arc::new(Locks::default());
        locks.hold(&b, 100);
        let (orchestrator, progress) = orchestrator(&locks);

        let batch = DeletionBatch::new(vec![
            PathEntry::file(&a),
            PathEntry::file(&b),
            PathEntry::file(&c),
        ]);
        let worker = {
            let orchestrator = Arc::clone(&orchestrator);
            thread::spawn(move || orchestrator.run(batch))
        };

        wait_until("conflict", || progress.conflict_pending());
        progress.cancel();
        let summary = worker.join().unwrap();

        assert!(!a.exists());
        assert!(b.exists() && c.exists());
        assert!(summary.cancelled);
        assert_eq!(progress.completed(), 1);
        assert_eq!(locks.removal_attempts(&c), 0);
        assert!(!progress.conflict_pending());
        assert_eq!(progress.run_state(), RunState::Cancelled);
    }
}
