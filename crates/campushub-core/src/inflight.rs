// Duplicate-submission guard
//
// Every mutation is one discrete awaited round trip with no cancellation, so
// a double-click can issue the same write twice before the first resolves.
// UI handlers claim the entity id here before mutating and let the token
// drop when the round trip resolves.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

/// Tracks entity ids with a mutation in flight.
#[derive(Debug, Default, Clone)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<Uuid>>>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an entity for a mutation. Returns `None` while a previous
    /// mutation of the same entity is still in flight; the caller drops the
    /// duplicate submission.
    pub fn begin(&self, id: Uuid) -> Option<InFlightToken> {
        let mut active = lock(&self.active);
        if active.insert(id) {
            Some(InFlightToken {
                id,
                active: Arc::clone(&self.active),
            })
        } else {
            None
        }
    }

    /// Whether a mutation of this entity is currently in flight.
    pub fn is_in_flight(&self, id: Uuid) -> bool {
        lock(&self.active).contains(&id)
    }
}

/// Releases the claim on drop, success or failure alike.
#[derive(Debug)]
pub struct InFlightToken {
    id: Uuid,
    active: Arc<Mutex<HashSet<Uuid>>>,
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        lock(&self.active).remove(&self.id);
    }
}

// a poisoned lock only means a panic elsewhere mid-insert; the set stays usable
fn lock(active: &Mutex<HashSet<Uuid>>) -> MutexGuard<'_, HashSet<Uuid>> {
    match active.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
