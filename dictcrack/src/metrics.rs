use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Counters shared by the workers of a scan.
///
/// Cloning is cheap and every clone feeds the same counters, so one instance
/// can be handed to a scanner and inspected afterwards.
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    candidates_hashed: Arc<AtomicU64>,
    matches_found: Arc<AtomicU64>,
    publications_won: Arc<AtomicU64>,
    publications_lost: Arc<AtomicU64>,
    workers_cancelled: Arc<AtomicU64>,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self {
            candidates_hashed: Arc::new(AtomicU64::new(0)),
            matches_found: Arc::new(AtomicU64::new(0)),
            publications_won: Arc::new(AtomicU64::new(0)),
            publications_lost: Arc::new(AtomicU64::new(0)),
            workers_cancelled: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a batch of hashed candidates
    pub fn record_hashed(&self, count: u64) {
        self.candidates_hashed.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a digest match and whether its publication won the race
    pub fn record_match(&self, published: bool) {
        self.matches_found.fetch_add(1, Ordering::Relaxed);
        if published {
            self.publications_won.fetch_add(1, Ordering::Relaxed);
        } else {
            self.publications_lost.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records a worker that stopped before exhausting its partition
    pub fn record_cancelled(&self) {
        self.workers_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            candidates_hashed: self.candidates_hashed.load(Ordering::Relaxed),
            matches_found: self.matches_found.load(Ordering::Relaxed),
            publications_won: self.publications_won.load(Ordering::Relaxed),
            publications_lost: self.publications_lost.load(Ordering::Relaxed),
            workers_cancelled: self.workers_cancelled.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        debug!(
            "Scan stats:\n\
             Candidates hashed: {}\n\
             Matches found: {}\n\
             Publications won/lost: {}/{}\n\
             Workers cancelled: {}",
            stats.candidates_hashed,
            stats.matches_found,
            stats.publications_won,
            stats.publications_lost,
            stats.workers_cancelled
        );
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`ScanMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub candidates_hashed: u64,
    pub matches_found: u64,
    pub publications_won: u64,
    pub publications_lost: u64,
    pub workers_cancelled: u64,
}
