//! Chart artifacts handed to an external renderer.
//!
//! Artifacts are plot-friendly (parallel arrays, no nesting) and serializable;
//! the core never renders. `ChartSink` is the seam a caller implements to
//! persist or draw them.

use rand::Rng;
use serde::Serialize;

use crate::cfg::{X_MAX, X_MIN, Y_MAX, Y_MIN};
use crate::error::SimError;
use crate::region::{classify, Region};
use crate::stats::AggregateStats;
use crate::trial::SamplingArea;

/// Mean estimate per sample size, with π as the reference line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConvergenceChart {
    pub schema_version: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Categorical x axis: sample sizes as labels.
    pub sample_sizes: Vec<u64>,
    pub means: Vec<f64>,
    pub reference: f64,
}

impl ConvergenceChart {
    pub fn from_stats(stats: &[AggregateStats]) -> Self {
        Self {
            schema_version: "montecarlo_convergence_v0".to_string(),
            title: "Estimated Pi vs. Number of Trials".to_string(),
            x_label: "Number of Trials (N)".to_string(),
            y_label: "Estimated Pi".to_string(),
            sample_sizes: stats.iter().map(|s| s.sample_size.get()).collect(),
            means: stats.iter().map(|s| s.mean).collect(),
            reference: std::f64::consts::PI,
        }
    }
}

/// Points of one region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub region: Region,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Marble-drop illustration: sampled points grouped by region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterChart {
    pub schema_version: String,
    pub title: String,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn series(&self, region: Region) -> Option<&ScatterSeries> {
        self.series.iter().find(|s| s.region == region)
    }

    pub fn total_points(&self) -> usize {
        self.series.iter().map(|s| s.x.len()).sum()
    }
}

/// Draw `count` points with the trial sampler and group them by region.
pub fn sample_scatter<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
) -> Result<ScatterChart, SimError> {
    if count == 0 {
        return Err(SimError::invalid("marble count must be > 0"));
    }
    let area = SamplingArea::default();
    let mut series: Vec<ScatterSeries> = Region::ALL
        .iter()
        .map(|&region| ScatterSeries {
            region,
            x: Vec::new(),
            y: Vec::new(),
        })
        .collect();
    for _ in 0..count {
        let p = area.sample(rng);
        let idx = match classify(p) {
            Region::Rectangle => 0,
            Region::Circle => 1,
            Region::Other => 2,
        };
        series[idx].x.push(p.x);
        series[idx].y.push(p.y);
    }
    Ok(ScatterChart {
        schema_version: "montecarlo_scatter_v0".to_string(),
        title: format!("Monte Carlo Simulation with {count} Points"),
        x_range: [X_MIN, X_MAX],
        y_range: [Y_MIN, Y_MAX],
        series,
    })
}

/// Rendering sink. Return values are not consumed by the run.
pub trait ChartSink {
    type Error;

    fn render_convergence(&mut self, chart: &ConvergenceChart) -> Result<(), Self::Error>;
    fn render_scatter(&mut self, chart: &ScatterChart) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::SampleSize;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn convergence_arrays_align_with_stats() {
        let stats = [
            AggregateStats {
                sample_size: SampleSize::new(1000).unwrap(),
                experiments: 3,
                mean: 3.2,
            },
            AggregateStats {
                sample_size: SampleSize::new(10_000).unwrap(),
                experiments: 3,
                mean: 3.15,
            },
        ];
        let chart = ConvergenceChart::from_stats(&stats);
        assert_eq!(chart.sample_sizes, vec![1000, 10_000]);
        assert_eq!(chart.means, vec![3.2, 3.15]);
        assert_eq!(chart.reference, std::f64::consts::PI);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["means"][1], 3.15);
    }

    #[test]
    fn scatter_groups_every_point_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let chart = sample_scatter(5_000, &mut rng).unwrap();
        assert_eq!(chart.total_points(), 5_000);
        for region in Region::ALL {
            let s = chart.series(region).unwrap();
            assert_eq!(s.x.len(), s.y.len());
            for (x, y) in s.x.iter().zip(&s.y) {
                assert_eq!(crate::region::classify_xy(*x, *y), region);
            }
        }
        assert!(sample_scatter(0, &mut rng).is_err());
    }
}
