use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace};

use super::partition::{partition, Partition};
use super::resolution::ResolutionCell;
use crate::digest::Digester;
use crate::errors::{CrackError, CrackResult};
use crate::metrics::ScanMetrics;
use crate::results::SearchOutcome;

/// Partitioned scan racing `workers` threads to the first match.
///
/// Each call builds a dedicated pool with exactly `workers` threads and a
/// fresh [`ResolutionCell`], so nothing carries over between scans. The
/// winner among duplicate matching candidates is whichever worker publishes
/// first; unlike [`super::sequential_scan`] it is not necessarily the
/// smallest index.
///
/// Timings taken around [`ParallelScanner::scan`] include starting the pool's
/// worker threads.
#[derive(Debug, Clone)]
pub struct ParallelScanner {
    workers: NonZeroUsize,
    metrics: Option<ScanMetrics>,
}

impl ParallelScanner {
    /// Fails with [`CrackError::InvalidWorkerCount`] when `workers` is zero
    pub fn new(workers: usize) -> CrackResult<Self> {
        let workers = NonZeroUsize::new(workers).ok_or(CrackError::InvalidWorkerCount(workers))?;
        Ok(Self::with_workers(workers))
    }

    pub fn with_workers(workers: NonZeroUsize) -> Self {
        Self {
            workers,
            metrics: None,
        }
    }

    /// Attaches counters that every worker of subsequent scans feeds
    pub fn with_metrics(mut self, metrics: ScanMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    pub fn scan<D>(&self, target: &str, corpus: &[String], digest: &D) -> CrackResult<SearchOutcome>
    where
        D: Digester + ?Sized,
    {
        if corpus.is_empty() {
            return Err(CrackError::EmptyCorpus);
        }

        let parts = partition(corpus.len(), self.workers);
        debug!(
            "Parallel scan: {} candidates across {} workers (chunk {})",
            corpus.len(),
            parts.len(),
            corpus.len() / parts.len()
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers.get())
            .thread_name(|i| format!("dictcrack-worker-{}", i))
            .build()
            .map_err(|e| CrackError::WorkerSpawn(e.to_string()))?;

        let cell = ResolutionCell::new();
        let metrics = self.metrics.as_ref();

        // The scope joins every spawned worker before returning, panicking or not.
        let joined = panic::catch_unwind(AssertUnwindSafe(|| {
            pool.scope(|s| {
                for (id, part) in parts.iter().copied().enumerate() {
                    let cell = &cell;
                    s.spawn(move |_| {
                        scan_partition(id, target, corpus, part, digest, cell, metrics)
                    });
                }
            })
        }));
        if let Err(payload) = joined {
            return Err(CrackError::WorkerPanicked(panic_message(payload.as_ref())));
        }

        if let Some(metrics) = metrics {
            metrics.log_stats();
        }

        let outcome = SearchOutcome::from(cell.into_inner());
        debug!("Parallel scan with {} workers: {}", self.workers, outcome);
        Ok(outcome)
    }
}

impl Default for ParallelScanner {
    /// One worker per logical CPU
    fn default() -> Self {
        let workers = NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN);
        Self::with_workers(workers)
    }
}

/// Convenience wrapper around [`ParallelScanner::scan`]
pub fn parallel_scan<D>(
    target: &str,
    corpus: &[String],
    digest: &D,
    workers: usize,
) -> CrackResult<SearchOutcome>
where
    D: Digester + ?Sized,
{
    ParallelScanner::new(workers)?.scan(target, corpus, digest)
}

fn scan_partition<D>(
    id: usize,
    target: &str,
    corpus: &[String],
    part: Partition,
    digest: &D,
    cell: &ResolutionCell,
    metrics: Option<&ScanMetrics>,
) where
    D: Digester + ?Sized,
{
    if part.is_empty() {
        trace!("Worker {} has an empty partition", id);
        return;
    }

    let mut hashed = 0u64;
    let mut cancelled = false;

    for candidate in &corpus[part.range()] {
        if cell.is_resolved() {
            cancelled = true;
            break;
        }
        hashed += 1;
        if digest.digest(candidate) == target {
            let won = cell.publish(candidate);
            trace!(
                "Worker {} matched at {:?}, published: {}",
                id,
                part.range(),
                won
            );
            if let Some(metrics) = metrics {
                metrics.record_match(won);
            }
            break;
        }
    }

    if let Some(metrics) = metrics {
        metrics.record_hashed(hashed);
        if cancelled {
            metrics.record_cancelled();
        }
    }
    trace!(
        "Worker {} done: {} of {} candidates hashed, cancelled: {}",
        id,
        hashed,
        part.len(),
        cancelled
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
