use clap::{Parser, Subcommand};
use colored::Colorize;
use dictcrack::{
    bench::ProgressEvent,
    config::{BenchConfig, CliOverrides},
    corpus::Corpus,
    results::BenchmarkReport,
    search::{find_sequential, ParallelScanner},
    BenchmarkRunner, CrackError, DigestAlgorithm, Digester,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::{num::NonZeroUsize, path::PathBuf, time::Duration, time::Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, CrackError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct BenchArgs {
    /// Wordlist to load, one candidate per line
    #[arg(short = 'w', long)]
    wordlist: Option<PathBuf>,

    /// Hash algorithm to benchmark (can be specified multiple times)
    #[arg(short = 'a', long = "algorithm")]
    algorithms: Vec<DigestAlgorithm>,

    /// Worker count to time (can be specified multiple times)
    #[arg(short = 'j', long = "threads")]
    threads: Vec<NonZeroUsize>,

    /// Number of times to repeat the full sweep
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// Password to recover instead of a random pick
    #[arg(short, long)]
    secret: Option<String>,

    /// Seed for the random password pick
    #[arg(long)]
    seed: Option<u64>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Time sequential and parallel scans across algorithms and worker counts
    Bench(Box<BenchArgs>),

    /// Recover the password behind a single digest
    Crack {
        /// Wordlist to load, one candidate per line
        #[arg(short = 'w', long)]
        wordlist: PathBuf,

        /// Hash algorithm of the digest
        #[arg(short = 'a', long)]
        algorithm: DigestAlgorithm,

        /// Hex digest to recover
        #[arg(long)]
        hash: String,

        /// Number of workers (default: number of CPUs)
        #[arg(short = 'j', long)]
        threads: Option<NonZeroUsize>,

        /// Use the single-threaded scan
        #[arg(long, conflicts_with = "threads")]
        sequential: bool,
    },

    /// Print the digest of a word
    Hash {
        /// Hash algorithm to apply
        #[arg(short = 'a', long)]
        algorithm: DigestAlgorithm,

        /// Word to hash
        word: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench(args) => {
            let args = *args;
            let file_config = BenchConfig::load_from(args.config.as_deref())?;
            let config = file_config.merge_with_cli(CliOverrides {
                wordlist: args.wordlist,
                algorithms: args.algorithms,
                worker_counts: args.threads,
                trials: args.trials,
                secret: args.secret,
                seed: args.seed,
                log_level: cli.log_level,
            });
            init_tracing(&config.log_level);
            debug!("Effective configuration: {:?}", config);

            let corpus = Corpus::load_non_empty(&config.wordlist)?;
            let runner = BenchmarkRunner::new(config)?;

            let progress = if args.quiet || args.json {
                ProgressBar::hidden()
            } else {
                let pb = ProgressBar::new(runner.total_scans() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                pb
            };

            let report = runner.run_with_progress(&corpus, |event: ProgressEvent<'_>| {
                let label = match event.workers {
                    Some(workers) => format!("{} x{}", event.algorithm, workers),
                    None => format!("{} sequential", event.algorithm),
                };
                progress.set_message(label);
                progress.inc(1);
            })?;
            progress.finish_and_clear();

            if args.json {
                let json = report
                    .to_json()
                    .map_err(|e| CrackError::config_error(format!("JSON encoding failed: {}", e)))?;
                println!("{}", json);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Commands::Crack {
            wordlist,
            algorithm,
            hash,
            threads,
            sequential,
        } => {
            init_tracing(cli.log_level.as_deref().unwrap_or("warn"));
            let corpus = Corpus::load_non_empty(&wordlist)?;
            let target = hash.trim().to_ascii_lowercase();

            let start = Instant::now();
            let outcome = if sequential {
                find_sequential(&target, &corpus, &algorithm)?
            } else {
                let scanner = match threads {
                    Some(workers) => ParallelScanner::with_workers(workers),
                    None => ParallelScanner::default(),
                };
                scanner.scan(&target, &corpus, &algorithm)?
            };
            let elapsed = start.elapsed();

            match outcome.candidate() {
                Some(candidate) => println!("{} {}", "Found:".green().bold(), candidate),
                None => println!("{}", "Not found".yellow()),
            }
            println!(
                "Searched {} candidates in {}",
                corpus.len(),
                format_duration(elapsed)
            );
            Ok(())
        }
        Commands::Hash { algorithm, word } => {
            println!("{}", algorithm.digest(&word));
            Ok(())
        }
    }
}

fn format_duration(elapsed: Duration) -> humantime::FormattedDuration {
    // Microsecond resolution is plenty for a scan timing.
    let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    humantime::format_duration(Duration::from_micros(micros))
}

fn print_report(report: &BenchmarkReport) {
    println!(
        "Selected password: {} ({} candidates)\n",
        report.secret.bold(),
        report.corpus_size
    );

    for trial in &report.trials {
        if report.trials.len() > 1 {
            println!("{}", format!("--- Trial {} ---", trial.trial).dimmed());
        }
        for run in &trial.runs {
            println!("=== Hash Algorithm: {} ===", run.algorithm.to_string().blue());
            println!("Target hash: {}", run.target);
            println!(
                "Sequential result: {}, Time: {:.6}s",
                mark(&run.sequential.outcome.to_string(), run.sequential.correct),
                run.sequential.elapsed.as_secs_f64()
            );
            for p in &run.parallel {
                println!(
                    "Parallel ({} threads) result: {}, Time: {:.6}s",
                    p.workers,
                    mark(&p.timing.outcome.to_string(), p.timing.correct),
                    p.timing.elapsed.as_secs_f64()
                );
            }
            println!("==============================\n");
        }
    }

    for summary in &report.summaries {
        println!("=== {} ===", summary.algorithm.to_string().blue());
        println!(
            "Avg Sequential Time: {:.4}s",
            summary.sequential_mean_seconds
        );
        for w in &summary.workers {
            println!(
                "Threads: {}, Avg Parallel: {:.4}s, Speedup: {:.2}, Efficiency: {:.2}",
                w.workers.to_string().green(),
                w.mean_seconds,
                w.speedup,
                w.efficiency
            );
        }
        println!();
    }

    if !report.all_correct() {
        println!("{}", "Warning: some scans did not recover the password".red());
    }
}

fn mark(text: &str, correct: bool) -> colored::ColoredString {
    if correct {
        text.green()
    } else {
        text.red()
    }
}
