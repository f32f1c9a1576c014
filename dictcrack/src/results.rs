/// Result types for scans and benchmark runs.
///
/// [`SearchOutcome`] is what a single scan returns. The remaining types make
/// up a [`BenchmarkReport`]: raw per-trial timings plus the per-algorithm
/// aggregates (mean time, speedup, efficiency) derived from them. Everything
/// here is `Serialize` so a report can be written out as JSON.
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::digest::DigestAlgorithm;

/// The result of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "candidate", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(String),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn candidate(&self) -> Option<&str> {
        match self {
            SearchOutcome::Found(candidate) => Some(candidate),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn into_candidate(self) -> Option<String> {
        match self {
            SearchOutcome::Found(candidate) => Some(candidate),
            SearchOutcome::NotFound => None,
        }
    }
}

impl From<Option<String>> for SearchOutcome {
    fn from(candidate: Option<String>) -> Self {
        match candidate {
            Some(candidate) => SearchOutcome::Found(candidate),
            None => SearchOutcome::NotFound,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(candidate) => f.write_str(candidate),
            SearchOutcome::NotFound => f.write_str("<not found>"),
        }
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// One timed scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanTiming {
    pub outcome: SearchOutcome,
    #[serde(rename = "seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Whether the outcome was the planted secret
    pub correct: bool,
}

/// A parallel scan timed at one worker count
#[derive(Debug, Clone, Serialize)]
pub struct ParallelTiming {
    pub workers: usize,
    #[serde(flatten)]
    pub timing: ScanTiming,
}

/// All timings for one algorithm within one trial
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmRun {
    pub algorithm: DigestAlgorithm,
    pub target: String,
    pub sequential: ScanTiming,
    pub parallel: Vec<ParallelTiming>,
}

/// One pass over every configured algorithm
#[derive(Debug, Clone, Serialize)]
pub struct TrialReport {
    pub trial: usize,
    pub runs: Vec<AlgorithmRun>,
}

/// Averages for one worker count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkerSummary {
    pub workers: usize,
    pub mean_seconds: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

/// Averages for one algorithm across all trials
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub algorithm: DigestAlgorithm,
    pub sequential_mean_seconds: f64,
    pub workers: Vec<WorkerSummary>,
}

/// Complete output of a benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub secret: String,
    pub corpus_size: usize,
    pub trials: Vec<TrialReport>,
    pub summaries: Vec<AlgorithmSummary>,
}

impl BenchmarkReport {
    /// Builds a report and derives the per-algorithm summaries
    pub fn new(secret: String, corpus_size: usize, trials: Vec<TrialReport>) -> Self {
        let summaries = summarize(&trials);
        Self {
            secret,
            corpus_size,
            trials,
            summaries,
        }
    }

    /// True when every scan of every trial recovered the secret
    pub fn all_correct(&self) -> bool {
        self.trials.iter().flat_map(|t| &t.runs).all(|run| {
            run.sequential.correct && run.parallel.iter().all(|p| p.timing.correct)
        })
    }

    pub fn summary_for(&self, algorithm: DigestAlgorithm) -> Option<&AlgorithmSummary> {
        self.summaries.iter().find(|s| s.algorithm == algorithm)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Averages timings per algorithm and worker count, in first-seen order.
///
/// Speedup is `sequential mean / parallel mean` and efficiency is speedup
/// divided by the worker count; both are zero when the parallel mean is zero.
pub fn summarize(trials: &[TrialReport]) -> Vec<AlgorithmSummary> {
    let mut algorithms: Vec<DigestAlgorithm> = Vec::new();
    for run in trials.iter().flat_map(|t| &t.runs) {
        if !algorithms.contains(&run.algorithm) {
            algorithms.push(run.algorithm);
        }
    }

    algorithms
        .into_iter()
        .map(|algorithm| {
            let runs: Vec<&AlgorithmRun> = trials
                .iter()
                .flat_map(|t| &t.runs)
                .filter(|run| run.algorithm == algorithm)
                .collect();

            let seq_times: Vec<f64> = runs
                .iter()
                .map(|run| run.sequential.elapsed.as_secs_f64())
                .collect();
            let seq_mean = mean(&seq_times);

            let mut worker_counts: Vec<usize> = Vec::new();
            for p in runs.iter().flat_map(|run| &run.parallel) {
                if !worker_counts.contains(&p.workers) {
                    worker_counts.push(p.workers);
                }
            }

            let workers = worker_counts
                .into_iter()
                .map(|workers| {
                    let times: Vec<f64> = runs
                        .iter()
                        .flat_map(|run| &run.parallel)
                        .filter(|p| p.workers == workers)
                        .map(|p| p.timing.elapsed.as_secs_f64())
                        .collect();
                    let mean_seconds = mean(&times);
                    let speedup = if mean_seconds > 0.0 {
                        seq_mean / mean_seconds
                    } else {
                        0.0
                    };
                    WorkerSummary {
                        workers,
                        mean_seconds,
                        speedup,
                        efficiency: speedup / workers as f64,
                    }
                })
                .collect();

            AlgorithmSummary {
                algorithm,
                sequential_mean_seconds: seq_mean,
                workers,
            }
        })
        .collect()
}
