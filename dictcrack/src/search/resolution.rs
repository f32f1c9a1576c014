use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Single-assignment result slot shared by the workers of one scan.
///
/// `resolved` is the cancellation signal workers poll between candidates.
/// `publish` performs the check-then-set under the slot's mutex, so exactly
/// one candidate is ever recorded no matter how many workers find a match.
#[derive(Debug, Default)]
pub struct ResolutionCell {
    resolved: AtomicBool,
    slot: Mutex<Option<String>>,
}

impl ResolutionCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once some worker has published a match
    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }

    /// Records `candidate` if nothing has been published yet.
    ///
    /// Returns `false` when another worker got there first; the caller's
    /// finding is then dropped.
    pub fn publish(&self, candidate: &str) -> bool {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(candidate.to_owned());
        self.resolved.store(true, Ordering::Release);
        true
    }

    /// Consumes the cell, yielding the published candidate if any
    pub fn into_inner(self) -> Option<String> {
        match self.slot.into_inner() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
