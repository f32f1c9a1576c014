/// Dictionary scanners.
///
/// Two strategies share one contract: given a target digest, the corpus and a
/// [`Digester`](crate::digest::Digester), report whether some candidate
/// hashes to the target.
///
/// - [`sequential_scan`] walks the corpus front to back and always reports
///   the smallest matching index.
/// - [`ParallelScanner`] splits the corpus into contiguous [`Partition`]s,
///   runs one worker per partition and stops every worker as soon as one of
///   them publishes a match through a [`ResolutionCell`].
///
/// ```rust,ignore
/// let target = DigestAlgorithm::Sha256.digest("banana");
/// let outcome = parallel_scan(&target, &corpus, &DigestAlgorithm::Sha256, 8)?;
/// assert_eq!(outcome.candidate(), Some("banana"));
/// ```
pub mod parallel;
pub mod partition;
pub mod resolution;
pub mod sequential;

pub use parallel::{parallel_scan, ParallelScanner};
pub use partition::{partition, Partition};
pub use resolution::ResolutionCell;
pub use sequential::{find_sequential, sequential_scan};
