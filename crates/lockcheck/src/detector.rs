//! Cycle check over the lock ownership snapshot.
//!
//! Each owning thread is a node. Its single outgoing edge is found by looking
//! the thread's own name up as if it were a resource: `owners[thread]`. This
//! is not a textbook wait-for graph (thread -> wanted resource -> owner); it
//! only ever reports a cycle when a thread name and a resource name coincide.
//! The behaviour is inherited and kept as is until there is a requirement
//! for something else.

use std::collections::HashSet;

use tracing::warn;

use crate::action::{ResourceId, ThreadId};
use crate::ledger::Owners;
use crate::log::ExecutionLog;

/// Stateless cycle detector; all walk state lives inside one [`check`] call.
///
/// [`check`]: DeadlockDetector::check
#[derive(Clone, Copy, Debug, Default)]
pub struct DeadlockDetector;

impl DeadlockDetector {
    pub fn new() -> Self {
        Self
    }

    /// Walk every owning thread and report the first one found on a cycle.
    ///
    /// On detection exactly one line is appended to `log` and the remaining
    /// threads are not examined.
    pub fn check(&self, owners: &Owners, log: &mut ExecutionLog) -> Option<ThreadId> {
        let mut visited: HashSet<ThreadId> = HashSet::new();

        for start in owners.values() {
            let mut stack: HashSet<ThreadId> = HashSet::new();
            if let Some(thread) = walk(start, owners, &mut visited, &mut stack) {
                warn!(thread = %thread, held = owners.len(), "deadlock cycle detected");
                log.append(format!("Deadlock detected involving thread: {thread}"));
                return Some(thread);
            }
        }
        None
    }
}

/// Depth-first walk from `node`. Returns the thread that closes a cycle back
/// into the current path.
fn walk(
    node: &ThreadId,
    owners: &Owners,
    visited: &mut HashSet<ThreadId>,
    stack: &mut HashSet<ThreadId>,
) -> Option<ThreadId> {
    if stack.contains(node) {
        return Some(node.clone());
    }
    if !visited.insert(node.clone()) {
        return None;
    }
    stack.insert(node.clone());

    // Inherited lookup: the thread's name is reused as a resource key.
    let as_resource = ResourceId::new(node.as_str());
    if let Some(next) = owners.get(&as_resource) {
        if let Some(found) = walk(next, owners, visited, stack) {
            return Some(found);
        }
    }

    stack.remove(node);
    None
}
