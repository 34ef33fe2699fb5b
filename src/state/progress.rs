/// Shared progress surface
///
/// Written by the scan and deletion workers, polled by the presentation layer
/// once per refresh. Path-valued fields share one mutex so a reader never sees
/// a half-written label; counters and flags are atomics.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::decision::{ConflictAction, DecisionSlot};

pub type ProcessId = u32;

/// A removal (or overwrite) that failed because the path is held open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockConflict {
    pub path: PathBuf,
    pub blocking: Vec<ProcessId>,
}

/// Top-level state of a deletion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Default)]
struct Labels {
    scanned: Option<PathBuf>,
    deleted: Option<PathBuf>,
    conflict: Option<LockConflict>,
    /// Bumped by every raised conflict, so two conflicts on one path differ
    conflict_serial: u64,
}

#[derive(Debug, Default)]
pub struct Progress {
    labels: Mutex<Labels>,
    completed: AtomicUsize,
    total: AtomicUsize,
    started: AtomicBool,
    finished: AtomicBool,
    cancelled: AtomicBool,
    conflict_pending: AtomicBool,
    decision: DecisionSlot,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    fn labels(&self) -> MutexGuard<'_, Labels> {
        self.labels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_latest_scanned(&self, path: &Path) {
        self.labels().scanned = Some(path.to_path_buf());
    }

    pub fn clear_latest_scanned(&self) {
        self.labels().scanned = None;
    }

    pub fn latest_scanned(&self) -> Option<PathBuf> {
        self.labels().scanned.clone()
    }

    pub fn set_latest_deleted(&self, path: &Path) {
        self.labels().deleted = Some(path.to_path_buf());
    }

    pub fn latest_deleted(&self) -> Option<PathBuf> {
        self.labels().deleted.clone()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Record one successfully removed path
    pub fn mark_deleted(&self, path: &Path) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.set_latest_deleted(path);
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
    }

    /// completed / total, clamped to 1.0; 0.0 while nothing is queued
    pub fn ratio(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.completed() as f32 / total as f32).min(1.0)
    }

    pub fn conflict_pending(&self) -> bool {
        self.conflict_pending.load(Ordering::SeqCst)
    }

    pub fn conflict(&self) -> Option<LockConflict> {
        self.labels().conflict.clone()
    }

    /// The conflict awaiting a decision, with its serial number.
    /// A new serial means a new question even when the path is the same.
    pub fn pending_conflict(&self) -> Option<(u64, LockConflict)> {
        let labels = self.labels();
        if !self.conflict_pending() {
            return None;
        }
        labels
            .conflict
            .clone()
            .map(|conflict| (labels.conflict_serial, conflict))
    }

    pub fn raise_conflict(&self, conflict: LockConflict) {
        let mut labels = self.labels();
        labels.conflict_serial += 1;
        labels.conflict = Some(conflict);
        self.conflict_pending.store(true, Ordering::SeqCst);
    }

    pub fn clear_conflict(&self) {
        self.conflict_pending.store(false, Ordering::SeqCst);
        self.labels().conflict = None;
    }

    pub fn decision(&self) -> &DecisionSlot {
        &self.decision
    }

    /// Route the user's Skip/Terminate choice to the orchestrator
    pub fn set_decision(&self, action: ConflictAction, remember: bool) {
        self.decision.set(action, remember);
    }

    pub fn action(&self) -> ConflictAction {
        self.decision.action()
    }

    pub fn remember(&self) -> bool {
        self.decision.remember()
    }

    /// Ask every worker to stop at the next path boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.decision.wake();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn run_state(&self) -> RunState {
        match (
            self.started.load(Ordering::SeqCst),
            self.is_finished(),
            self.is_cancelled(),
        ) {
            (false, _, _) => RunState::Idle,
            (true, false, _) => RunState::Running,
            (true, true, true) => RunState::Cancelled,
            (true, true, false) => RunState::Completed,
        }
    }

    /// Reset per-run fields at the start of a deletion run
    pub fn begin_run(&self, total: usize) {
        self.decision.reset();
        self.clear_conflict();
        self.completed.store(0, Ordering::SeqCst);
        self.set_total(total);
        self.finished.store(false, Ordering::SeqCst);
        self.started.store(true, Ordering::SeqCst);
    }

    pub fn finish_run(&self) {
        self.clear_conflict();
        self.finished.store(true, Ordering::SeqCst);
    }
}
