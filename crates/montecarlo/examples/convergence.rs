//! Convergence probe: mean estimate and wall time per sample size.
//!
//! Purpose
//! - Give a quick, reproducible view of how fast the circle/rectangle ratio
//!   approaches π, and what each size costs, without touching a workbook.
//!
//! Run: `cargo run --release -p montecarlo --example convergence`

use std::time::Instant;

use montecarlo::prelude::*;

fn main() {
    let cfg = RunConfig {
        experiments: 5,
        seed: 2024,
        ..RunConfig::default()
    };
    let sizes = cfg.validate().expect("valid config");
    let mut source = UniformTrials::seeded(cfg.seed);
    for size in sizes {
        let start = Instant::now();
        let run = run_experiments(&[size], cfg.experiments, &mut source).expect("run");
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
        let stats = summarize(&run).expect("stats");
        let s = stats[0];
        println!(
            "N = {:>8}  mean = {:.6}  |mean - pi| = {:.6}  ({:.1} ms)",
            size,
            s.mean,
            s.abs_error(),
            elapsed_ms
        );
    }
}
