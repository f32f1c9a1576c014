use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::BenchConfig;
use crate::corpus::Corpus;
use crate::digest::{DigestAlgorithm, Digester};
use crate::errors::{CrackError, CrackResult};
use crate::results::{AlgorithmRun, BenchmarkReport, ParallelTiming, ScanTiming, TrialReport};
use crate::search::{find_sequential, ParallelScanner};

/// Reported after every timed scan
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent<'a> {
    pub trial: usize,
    pub algorithm: DigestAlgorithm,
    /// `None` for the sequential baseline
    pub workers: Option<usize>,
    pub timing: &'a ScanTiming,
}

/// Drives the sequential-vs-parallel sweep described by a [`BenchConfig`]
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    config: BenchConfig,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> CrackResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Number of timed scans a full run performs
    pub fn total_scans(&self) -> usize {
        self.config.trials * self.config.algorithms.len() * (1 + self.config.worker_counts.len())
    }

    pub fn run(&self, corpus: &Corpus) -> CrackResult<BenchmarkReport> {
        self.run_with_progress(corpus, |_| {})
    }

    /// Runs every trial, calling `on_progress` after each timed scan
    pub fn run_with_progress<F>(&self, corpus: &Corpus, mut on_progress: F) -> CrackResult<BenchmarkReport>
    where
        F: FnMut(ProgressEvent<'_>),
    {
        let secret = choose_secret(corpus, self.config.secret.as_deref(), self.config.seed)?;
        info!(
            "Benchmarking {} candidates, {} trials, secret {:?}",
            corpus.len(),
            self.config.trials,
            secret
        );

        let mut trials = Vec::with_capacity(self.config.trials);
        for trial in 1..=self.config.trials {
            let mut runs = Vec::with_capacity(self.config.algorithms.len());

            for &algorithm in &self.config.algorithms {
                let target = algorithm.digest(&secret);
                debug!("Trial {} {}: target {}", trial, algorithm, target);

                let start = Instant::now();
                let outcome = find_sequential(&target, corpus, &algorithm)?;
                let sequential = ScanTiming {
                    correct: outcome.candidate() == Some(secret.as_str()),
                    outcome,
                    elapsed: start.elapsed(),
                };
                on_progress(ProgressEvent {
                    trial,
                    algorithm,
                    workers: None,
                    timing: &sequential,
                });

                let mut parallel = Vec::with_capacity(self.config.worker_counts.len());
                for &workers in &self.config.worker_counts {
                    let scanner = ParallelScanner::with_workers(workers);
                    let start = Instant::now();
                    let outcome = scanner.scan(&target, corpus, &algorithm)?;
                    let timing = ScanTiming {
                        correct: outcome.candidate() == Some(secret.as_str()),
                        outcome,
                        elapsed: start.elapsed(),
                    };
                    on_progress(ProgressEvent {
                        trial,
                        algorithm,
                        workers: Some(workers.get()),
                        timing: &timing,
                    });
                    parallel.push(ParallelTiming {
                        workers: workers.get(),
                        timing,
                    });
                }

                runs.push(AlgorithmRun {
                    algorithm,
                    target,
                    sequential,
                    parallel,
                });
            }

            trials.push(TrialReport { trial, runs });
        }

        let report = BenchmarkReport::new(secret, corpus.len(), trials);
        info!("Benchmark complete, all scans correct: {}", report.all_correct());
        Ok(report)
    }
}

/// Picks the password to recover.
///
/// A fixed `secret` must appear in the corpus. Otherwise a uniformly random
/// entry is drawn, reproducibly when `seed` is given.
pub fn choose_secret(corpus: &Corpus, secret: Option<&str>, seed: Option<u64>) -> CrackResult<String> {
    if corpus.is_empty() {
        return Err(CrackError::EmptyCorpus);
    }

    if let Some(secret) = secret {
        if !corpus.contains(secret) {
            return Err(CrackError::secret_not_in_corpus(secret));
        }
        return Ok(secret.to_string());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    corpus
        .words()
        .choose(&mut rng)
        .cloned()
        .ok_or(CrackError::EmptyCorpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn corpus() -> Corpus {
        Corpus::from_lines((0..200).map(|i| format!("pass{}", i)))
    }

    #[test]
    fn test_fixed_secret_must_exist() {
        let corpus = corpus();
        assert_eq!(choose_secret(&corpus, Some("pass7"), None).unwrap(), "pass7");
        assert!(matches!(
            choose_secret(&corpus, Some("nope"), None),
            Err(CrackError::SecretNotInCorpus(_))
        ));
    }

    #[test]
    fn test_seeded_pick_is_reproducible() {
        let corpus = corpus();
        let a = choose_secret(&corpus, None, Some(42)).unwrap();
        let b = choose_secret(&corpus, None, Some(42)).unwrap();
        assert_eq!(a, b);
        assert!(corpus.contains(&a));
    }

    #[test]
    fn test_empty_corpus() {
        let empty = Corpus::default();
        assert!(matches!(
            choose_secret(&empty, None, None),
            Err(CrackError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_run_records_every_scan() {
        let config = BenchConfig {
            algorithms: vec![DigestAlgorithm::Md5, DigestAlgorithm::Sha1],
            worker_counts: vec![NonZeroUsize::new(1).unwrap(), NonZeroUsize::new(3).unwrap()],
            trials: 2,
            secret: Some("pass150".to_string()),
            ..BenchConfig::default()
        };
        let runner = BenchmarkRunner::new(config).unwrap();
        assert_eq!(runner.total_scans(), 12);

        let mut events = 0;
        let report = runner
            .run_with_progress(&corpus(), |event| {
                assert!(event.timing.correct);
                events += 1;
            })
            .unwrap();

        assert_eq!(events, 12);
        assert_eq!(report.secret, "pass150");
        assert_eq!(report.corpus_size, 200);
        assert_eq!(report.trials.len(), 2);
        assert!(report.all_correct());
        assert_eq!(report.summaries.len(), 2);
        assert_eq!(report.summaries[0].algorithm, DigestAlgorithm::Md5);
        assert_eq!(report.summaries[0].workers.len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BenchConfig {
            trials: 0,
            ..BenchConfig::default()
        };
        assert!(matches!(
            BenchmarkRunner::new(config),
            Err(CrackError::ConfigError(_))
        ));
    }
}
