//! Criterion benchmarks for report layout: fresh write vs. overwrite of a larger report.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use montecarlo::experiment::RunConfig;
use montecarlo::report::{report_template, write_report, SheetLayout, DEFAULT_SHEET_NAME};

fn bench_report(c: &mut Criterion) {
    let layout = SheetLayout::default();
    let sizes = vec![100, 200, 300, 400];
    let mut group = c.benchmark_group("report");
    for &m in &[1u32, 10, 50] {
        let run = RunConfig {
            sample_sizes: sizes.clone(),
            experiments: m,
            seed: 7,
        }
        .run()
        .unwrap();
        group.bench_with_input(BenchmarkId::new("write_fresh", m), &m, |b, _| {
            b.iter_batched(
                || report_template(&layout, DEFAULT_SHEET_NAME, &sizes),
                |mut sheet| write_report(&mut sheet, &layout, &run).unwrap(),
                BatchSize::SmallInput,
            )
        });
        let previous = RunConfig {
            sample_sizes: sizes.clone(),
            experiments: m * 2,
            seed: 8,
        }
        .run()
        .unwrap();
        group.bench_with_input(BenchmarkId::new("overwrite_larger", m), &m, |b, _| {
            b.iter_batched(
                || {
                    let mut sheet = report_template(&layout, DEFAULT_SHEET_NAME, &sizes);
                    write_report(&mut sheet, &layout, &previous).unwrap();
                    sheet
                },
                |mut sheet| write_report(&mut sheet, &layout, &run).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_report);
criterion_main!(benches);
