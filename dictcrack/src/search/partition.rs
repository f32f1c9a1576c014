use std::num::NonZeroUsize;
use std::ops::Range;

/// A half-open index range `[start, end)` of the corpus owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Splits `len` items into `workers` contiguous, disjoint partitions.
///
/// Every partition gets `len / workers` items and the last one also takes the
/// remainder, so the union is always exactly `[0, len)`. With more workers than
/// items all but the last partition are empty.
pub fn partition(len: usize, workers: NonZeroUsize) -> Vec<Partition> {
    let workers = workers.get();
    let chunk = len / workers;

    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i == workers - 1 { len } else { start + chunk };
            Partition { start, end }
        })
        .collect()
}
