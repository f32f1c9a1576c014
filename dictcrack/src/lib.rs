pub mod bench;
pub mod config;
pub mod corpus;
pub mod digest;
pub mod errors;
pub mod metrics;
pub mod results;
pub mod search;

pub use bench::BenchmarkRunner;
pub use config::BenchConfig;
pub use corpus::Corpus;
pub use digest::{DigestAlgorithm, Digester};
pub use errors::{CrackError, CrackResult};
pub use results::{BenchmarkReport, SearchOutcome};
pub use search::{find_sequential, parallel_scan, sequential_scan, ParallelScanner};
