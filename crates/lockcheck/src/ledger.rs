//! Lock ownership tracking.
//!
//! The ledger records which thread currently holds each resource. A resource
//! is a key in the ledger if and only if it is locked, and it has exactly one
//! owner. Acquisition is a conditional state transition: it never waits.

use std::collections::BTreeMap;

use crate::action::{ResourceId, ThreadId};

/// Snapshot of current ownership, iterated in resource order.
pub type Owners = BTreeMap<ResourceId, ThreadId>;

/// Shared lock state for one exploration.
#[derive(Clone, Debug, Default)]
pub struct LockLedger {
    owners: Owners,
}

impl LockLedger {
    pub fn new() -> Self {
        Self {
            owners: BTreeMap::new(),
        }
    }

    /// Take `resource` for `thread` if nobody holds it.
    ///
    /// Returns false and leaves the ledger untouched when the resource is
    /// already held, including by `thread` itself (locks are not re-entrant).
    pub fn acquire(&mut self, resource: &ResourceId, thread: &ThreadId) -> bool {
        if self.owners.contains_key(resource) {
            return false;
        }
        self.owners.insert(resource.clone(), thread.clone());
        true
    }

    /// Drop `resource` regardless of who holds it. Releasing a free resource
    /// is a no-op. Returns the previous owner, if there was one.
    pub fn release(&mut self, resource: &ResourceId) -> Option<ThreadId> {
        self.owners.remove(resource)
    }

    pub fn owners(&self) -> &Owners {
        &self.owners
    }

    pub fn owner_of(&self, resource: &ResourceId) -> Option<&ThreadId> {
        self.owners.get(resource)
    }

    pub fn is_locked(&self, resource: &ResourceId) -> bool {
        self.owners.contains_key(resource)
    }

    /// Number of resources currently held.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
