use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::digest::DigestAlgorithm;
use crate::errors::{CrackError, CrackResult};

/// Settings for a benchmark run.
///
/// Every field has a default matching the classic sweep (rockyou.txt, four
/// algorithms, 1 through 16 workers), so a config file only needs the values
/// it changes. Files are YAML:
///
/// ```yaml
/// # Wordlist, one candidate per line
/// wordlist: "rockyou.txt"
///
/// # Algorithms, in run order
/// algorithms: ["SHA-1", "SHA-256", "SHA-512", "MD5"]
///
/// # Parallel worker counts to time
/// worker_counts: [1, 2, 4, 8, 16]
///
/// # Repetitions of the whole sweep
/// trials: 10
///
/// # Fixed secret instead of a random pick (must be in the wordlist)
/// secret: "letmein"
///
/// # Seed for the random pick
/// seed: 42
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// Command-line values win over file values, see [`BenchConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Wordlist to load the corpus from
    #[serde(default = "default_wordlist")]
    pub wordlist: PathBuf,

    /// Hash algorithms to benchmark, in order
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<DigestAlgorithm>,

    /// Worker counts for the parallel scans
    #[serde(default = "default_worker_counts")]
    pub worker_counts: Vec<NonZeroUsize>,

    /// How many times the full sweep is repeated
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Password to recover; picked at random from the corpus when absent
    #[serde(default)]
    pub secret: Option<String>,

    /// Seed for the random secret pick
    #[serde(default)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_wordlist() -> PathBuf {
    PathBuf::from("rockyou.txt")
}

fn default_algorithms() -> Vec<DigestAlgorithm> {
    DigestAlgorithm::ALL.to_vec()
}

fn default_worker_counts() -> Vec<NonZeroUsize> {
    [1, 2, 4, 8, 16]
        .into_iter()
        .filter_map(NonZeroUsize::new)
        .collect()
}

fn default_trials() -> usize {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            wordlist: default_wordlist(),
            algorithms: default_algorithms(),
            worker_counts: default_worker_counts(),
            trials: default_trials(),
            secret: None,
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl BenchConfig {
    /// Loads configuration from `config_path`, or defaults when `None`.
    ///
    /// The result is not validated: command-line values may still fill in
    /// what the file leaves empty, so call [`BenchConfig::validate`] after
    /// [`BenchConfig::merge_with_cli`].
    pub fn load_from(config_path: Option<&Path>) -> CrackResult<Self> {
        let mut builder = ConfigBuilder::builder();
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(CrackError::file_not_found(path));
            }
            builder = builder.add_source(File::from(path));
        }

        let config: BenchConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Rejects settings that would make the sweep meaningless
    pub fn validate(&self) -> CrackResult<()> {
        if self.algorithms.is_empty() {
            return Err(CrackError::config_error("no hash algorithms configured"));
        }
        if self.worker_counts.is_empty() {
            return Err(CrackError::config_error("no worker counts configured"));
        }
        if self.trials == 0 {
            return Err(CrackError::config_error("trials must be at least 1"));
        }
        Ok(())
    }

    /// Merges CLI arguments over configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(wordlist) = cli.wordlist {
            self.wordlist = wordlist;
        }
        if !cli.algorithms.is_empty() {
            self.algorithms = cli.algorithms;
        }
        if !cli.worker_counts.is_empty() {
            self.worker_counts = cli.worker_counts;
        }
        if let Some(trials) = cli.trials {
            self.trials = trials;
        }
        if cli.secret.is_some() {
            self.secret = cli.secret;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }
}

/// Values given on the command line; unset fields keep the file value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub wordlist: Option<PathBuf>,
    pub algorithms: Vec<DigestAlgorithm>,
    pub worker_counts: Vec<NonZeroUsize>,
    pub trials: Option<usize>,
    pub secret: Option<String>,
    pub seed: Option<u64>,
    pub log_level: Option<String>,
}
