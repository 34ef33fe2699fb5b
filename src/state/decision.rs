/// Single-slot decision channel between the presentation layer and the orchestrator
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// What to do with the path that is currently blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictAction {
    /// No decision yet
    #[default]
    None,
    /// Leave the path on disk and move on
    Skip,
    /// Kill the processes holding the path, then retry once
    Terminate,
}

impl ConflictAction {
    /// Parse from user input ("s", "skip", "t", "terminate", "kill")
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "s" | "skip" => Some(ConflictAction::Skip),
            "t" | "k" | "terminate" | "kill" => Some(ConflictAction::Terminate),
            _ => None,
        }
    }
}

/// Stored action plus the "remember" flag.
/// `set` wakes a waiting orchestrator through the condvar.
#[derive(Debug, Default)]
pub struct DecisionSlot {
    action: Mutex<ConflictAction>,
    remember: AtomicBool,
    signal: Condvar,
}

impl DecisionSlot {
    fn slot(&self) -> MutexGuard<'_, ConflictAction> {
        self.action.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, action: ConflictAction, remember: bool) {
        let mut slot = self.slot();
        self.remember.store(remember, Ordering::SeqCst);
        *slot = action;
        self.signal.notify_all();
    }

    pub fn action(&self) -> ConflictAction {
        *self.slot()
    }

    pub fn remember(&self) -> bool {
        self.remember.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.set(ConflictAction::None, false);
    }

    /// Consume the pending decision.
    /// The slot is cleared afterwards unless "remember" is set.
    pub fn take(&self) -> Option<ConflictAction> {
        let mut slot = self.slot();
        match *slot {
            ConflictAction::None => None,
            action => {
                if !self.remember() {
                    *slot = ConflictAction::None;
                }
                Some(action)
            }
        }
    }

    /// Sleep until a decision arrives, `wake` is called, or `timeout` elapses.
    /// The lock is released while sleeping.
    pub fn wait(&self, timeout: Duration) {
        let slot = self.slot();
        if *slot != ConflictAction::None {
            return;
        }
        let _ = self
            .signal
            .wait_timeout(slot, timeout)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Wake waiters without changing the decision (used on cancellation)
    pub fn wake(&self) {
        let _slot = self.slot();
        self.signal.notify_all();
    }
}
