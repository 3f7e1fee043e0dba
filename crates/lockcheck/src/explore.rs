//! The exploration driver: runs every thread ordering to completion.
//!
//! One [`LockLedger`] and one [`ExecutionLog`] are created per exploration and
//! shared by every permutation. Nothing is reset between permutations, so a
//! lock left held by one ordering is still held when the next ordering's
//! first thread starts. That carry-over is part of the model.

use tracing::{debug, info};

use crate::action::ThreadId;
use crate::ledger::{LockLedger, Owners};
use crate::log::ExecutionLog;
use crate::permute::permutations;
use crate::runner::ThreadRunner;
use crate::thread::Thread;

/// A deadlock reported while running one permutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeadlockReport {
    /// Zero-based index of the permutation in generation order.
    pub permutation: u64,
    /// Thread whose run triggered the report.
    pub running: ThreadId,
    /// Thread named by the detector.
    pub involved: ThreadId,
}

/// Result of exploring all orderings.
#[derive(Clone, Debug)]
pub struct ExplorationResult {
    /// Total number of permutations run.
    pub permutations_explored: u64,
    /// Each ordering run, in generation order.
    pub orderings: Vec<Vec<ThreadId>>,
    pub deadlocks: Vec<DeadlockReport>,
    /// Ledger contents once the last permutation finished.
    pub held_at_end: Owners,
    pub log: ExecutionLog,
}

impl ExplorationResult {
    pub fn deadlock_free(&self) -> bool {
        self.deadlocks.is_empty()
    }
}

/// Drives the thread runner over every permutation of a thread set.
#[derive(Clone, Debug, Default)]
pub struct Explorer {
    runner: ThreadRunner,
    /// Stop after this many permutations (safety limit for large thread sets).
    max_permutations: Option<u64>,
}

impl Explorer {
    pub fn new() -> Self {
        Self {
            runner: ThreadRunner::new(),
            max_permutations: None,
        }
    }

    pub fn with_max_permutations(mut self, max_permutations: Option<u64>) -> Self {
        self.max_permutations = max_permutations;
        self
    }

    pub fn max_permutations(&self) -> Option<u64> {
        self.max_permutations
    }

    /// Run every ordering of `threads`, each thread to completion, against a
    /// single shared ledger and log.
    pub fn run(&self, mut threads: Vec<Thread>) -> ExplorationResult {
        let mut ledger = LockLedger::new();
        let mut log = ExecutionLog::new();

        let indices: Vec<usize> = (0..threads.len()).collect();
        let orderings = permutations(&indices);
        info!(
            threads = threads.len(),
            total = ?orderings.total(),
            limit = ?self.max_permutations,
            "starting exploration"
        );

        let limit = self.max_permutations.unwrap_or(u64::MAX);
        let mut result_orderings = Vec::new();
        let mut deadlocks = Vec::new();
        let mut explored: u64 = 0;

        for ordering in orderings {
            if explored >= limit {
                debug!(explored, "permutation limit reached");
                break;
            }

            let names: Vec<ThreadId> = ordering.iter().map(|&i| threads[i].id().clone()).collect();
            let label = names
                .iter()
                .map(ThreadId::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            debug!(permutation = explored, order = %label, held = ledger.len(), "running permutation");
            log.append(format!("Exploring permutation: {label}"));

            for &index in &ordering {
                let thread = &mut threads[index];
                log.append(format!("Running thread: {}", thread.id()));
                let outcome = self.runner.run(thread, &mut ledger, &mut log);
                if let Some(involved) = outcome.deadlock {
                    deadlocks.push(DeadlockReport {
                        permutation: explored,
                        running: thread.id().clone(),
                        involved,
                    });
                }
            }

            result_orderings.push(names);
            explored += 1;
        }

        info!(
            explored,
            deadlocks = deadlocks.len(),
            held = ledger.len(),
            lines = log.len(),
            "exploration finished"
        );

        ExplorationResult {
            permutations_explored: explored,
            orderings: result_orderings,
            deadlocks,
            held_at_end: ledger.owners().clone(),
            log,
        }
    }
}

/// Explore every ordering of `threads` and return the narrated log.
pub fn explore(threads: Vec<Thread>) -> ExecutionLog {
    Explorer::new().run(threads).log
}
