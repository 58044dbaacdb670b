//! Per-size aggregation of experiment estimates.
//!
//! Only the mean is materialized here. The report exposes the mode as a
//! spreadsheet formula over the raw per-experiment column instead.

use serde::Serialize;

use crate::error::SimError;
use crate::experiment::{ExperimentResult, ExperimentRun, SampleSize};

/// Mean of the estimates. Fails on an empty slice instead of reporting 0.
pub fn mean_estimate(results: &[ExperimentResult]) -> Result<f64, SimError> {
    if results.is_empty() {
        return Err(SimError::EmptyAggregation {
            sample_size: None,
        });
    }
    let sum: f64 = results.iter().map(|r| r.estimate).sum();
    Ok(sum / results.len() as f64)
}

/// Aggregate for one sample size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AggregateStats {
    pub sample_size: SampleSize,
    pub experiments: usize,
    pub mean: f64,
}

impl AggregateStats {
    /// Distance of the mean from π.
    #[inline]
    pub fn abs_error(&self) -> f64 {
        (self.mean - std::f64::consts::PI).abs()
    }
}

/// Means for every size of `run`, in configured order.
pub fn summarize(run: &ExperimentRun) -> Result<Vec<AggregateStats>, SimError> {
    run.series()
        .map(|(size, results)| -> Result<AggregateStats, SimError> {
            let mean = mean_estimate(results).map_err(|_| SimError::EmptyAggregation {
                sample_size: Some(size.get()),
            })?;
            tracing::info!(n = size.get(), mean, "mean estimate");
            Ok(AggregateStats {
                sample_size: size,
                experiments: results.len(),
                mean,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::run_experiments;
    use crate::trial::{RegionTally, ScriptedTrials};

    fn result(estimate_num: u64, estimate_den: u64) -> ExperimentResult {
        let n = 10_000;
        ExperimentResult::from_tally(
            SampleSize::new(n).unwrap(),
            1,
            RegionTally {
                rectangle: estimate_den,
                circle: estimate_num,
                other: n - estimate_num - estimate_den,
            },
        )
    }

    #[test]
    fn mean_of_estimates() {
        let rs = [result(300, 100), result(320, 100), result(0, 0)];
        let m = mean_estimate(&rs).unwrap();
        // Degenerate (0) estimates count toward the mean.
        assert!((m - (3.0 + 3.2 + 0.0) / 3.0).abs() < 1e-12);
        assert_eq!(mean_estimate(&rs[..1]).unwrap(), 3.0);
    }

    #[test]
    fn empty_aggregation_fails_fast() {
        assert_eq!(
            mean_estimate(&[]),
            Err(SimError::EmptyAggregation { sample_size: None })
        );
    }

    #[test]
    fn summarize_follows_configured_order() {
        let sizes = [SampleSize::new(20).unwrap(), SampleSize::new(10).unwrap()];
        let tallies = [
            RegionTally {
                rectangle: 2,
                circle: 6,
                other: 12,
            },
            RegionTally {
                rectangle: 1,
                circle: 4,
                other: 15,
            },
            RegionTally {
                rectangle: 1,
                circle: 3,
                other: 6,
            },
            RegionTally {
                rectangle: 0,
                circle: 3,
                other: 7,
            },
        ];
        let mut src = ScriptedTrials::new(tallies);
        let run = run_experiments(&sizes, 2, &mut src).unwrap();
        let stats = summarize(&run).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].sample_size.get(), 20);
        assert_eq!(stats[0].experiments, 2);
        assert!((stats[0].mean - 3.5).abs() < 1e-12);
        assert!((stats[1].mean - 1.5).abs() < 1e-12);
        assert!((stats[1].abs_error() - (std::f64::consts::PI - 1.5)).abs() < 1e-12);
    }
}
