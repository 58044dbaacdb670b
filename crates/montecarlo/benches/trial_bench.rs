//! Criterion benchmarks for the trial generator.
//! Focus sizes: N in {1e3, 1e4, 1e5}; 1e6 is left to the CLI runs.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use montecarlo::region::{classify_xy, Region};
use montecarlo::trial::run_trial;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("trial");
    for &n in &[1_000u64, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::new("run_trial", n), &n, |b, &n| {
            b.iter_batched(
                || StdRng::seed_from_u64(43),
                |mut rng| {
                    let _t = run_trial(n, &mut rng).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(44);
    let pts: Vec<(f64, f64)> = (0..4096)
        .map(|_| (rng.gen_range(-2.0..4.0), rng.gen_range(-2.0..2.0)))
        .collect();
    c.bench_function("classify_4096", |b| {
        b.iter(|| pts.iter().filter(|(x, y)| classify_xy(*x, *y) == Region::Rectangle).count())
    });
}

criterion_group!(benches, bench_trial, bench_classify);
criterion_main!(benches);
