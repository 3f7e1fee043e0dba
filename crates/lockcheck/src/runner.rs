//! Replays one thread's program against the shared ledger.

use tracing::{debug, trace};

use crate::action::{Action, ThreadId};
use crate::detector::DeadlockDetector;
use crate::ledger::LockLedger;
use crate::log::ExecutionLog;
use crate::thread::Thread;

/// What happened while one thread ran to completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub actions_executed: usize,
    pub failed_acquisitions: usize,
    /// First thread reported by a deadlock check during this run.
    pub deadlock: Option<ThreadId>,
}

/// Runs threads one at a time, checking for deadlock after every action.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRunner {
    detector: DeadlockDetector,
}

impl ThreadRunner {
    pub fn new() -> Self {
        Self {
            detector: DeadlockDetector::new(),
        }
    }

    /// Replay `thread` from its first action to its last.
    ///
    /// A failed lock is narrated and skipped; nothing here blocks or aborts.
    pub fn run(
        &self,
        thread: &mut Thread,
        ledger: &mut LockLedger,
        log: &mut ExecutionLog,
    ) -> RunOutcome {
        thread.reset();
        let id = thread.id().clone();
        let mut outcome = RunOutcome::default();

        while let Some(action) = thread.next_action() {
            trace!(thread = %id, %action, "replaying action");
            match action {
                Action::Lock(resource) => {
                    if ledger.acquire(resource, &id) {
                        log.append(format!("{id} acquired lock on {resource}"));
                    } else {
                        outcome.failed_acquisitions += 1;
                        debug!(
                            thread = %id,
                            %resource,
                            owner = ?ledger.owner_of(resource).map(ThreadId::as_str),
                            "lock acquisition failed"
                        );
                        log.append(format!("{id} failed to acquire lock on {resource}"));
                    }
                }
                Action::Unlock(resource) => {
                    ledger.release(resource);
                    log.append(format!("{id} released lock on {resource}"));
                }
                Action::Generic(label) => {
                    log.append(format!("{id} executed action: {label}"));
                }
            }
            outcome.actions_executed += 1;

            let found = self.detector.check(ledger.owners(), log);
            if outcome.deadlock.is_none() {
                outcome.deadlock = found;
            }
        }

        outcome
    }
}
