use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dictcrack::{
    corpus::Corpus,
    search::{sequential_scan, ParallelScanner},
    DigestAlgorithm, Digester,
};
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

fn create_corpus(size: usize) -> Corpus {
    Corpus::from_lines((0..size).map(|i| format!("password{}", i)))
}

fn bench_algorithms(c: &mut Criterion) {
    let corpus = create_corpus(20_000);
    // Planted near the end so the sequential scan does most of the work.
    let secret = corpus[corpus.len() * 9 / 10].clone();

    let mut group = c.benchmark_group("Sequential By Algorithm");
    for algorithm in DigestAlgorithm::ALL {
        let target = algorithm.digest(&secret);
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| black_box(sequential_scan(black_box(&target), &corpus, &algorithm)));
        });
    }
    group.finish();
}

fn bench_worker_scaling(c: &mut Criterion) {
    let corpus = create_corpus(50_000);
    let algorithm = DigestAlgorithm::Sha256;
    let target = algorithm.digest("missing from corpus");

    let mut group = c.benchmark_group("Parallel Worker Scaling");
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(sequential_scan(&target, &corpus, &algorithm)));
    });
    for workers in [1, 2, 4, 8, 16] {
        let scanner = ParallelScanner::new(workers).unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &scanner, |b, scanner| {
            b.iter(|| black_box(scanner.scan(&target, &corpus, &algorithm).unwrap()));
        });
    }
    group.finish();
}

fn bench_early_exit(c: &mut Criterion) {
    let corpus = create_corpus(50_000);
    let algorithm = DigestAlgorithm::Md5;
    // First slot of the second partition: one worker hits it immediately.
    let target = algorithm.digest(&corpus[corpus.len() / 4]);
    let scanner = ParallelScanner::new(4).unwrap();

    c.bench_function("early_exit_4_workers", |b| {
        b.iter(|| black_box(scanner.scan(&target, &corpus, &algorithm).unwrap()));
    });
}

fn bench_corpus_load(c: &mut Criterion) -> std::io::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("words.txt");
    let mut file = File::create(&path)?;
    for i in 0..100_000 {
        writeln!(file, "password{}", i)?;
    }

    c.bench_function("corpus_load_100k", |b| {
        b.iter(|| black_box(Corpus::load(&path).unwrap()));
    });
    Ok(())
}

fn bench_corpus(c: &mut Criterion) {
    bench_corpus_load(c).unwrap();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_algorithms, bench_worker_scaling, bench_early_exit, bench_corpus
}

criterion_main!(benches);
