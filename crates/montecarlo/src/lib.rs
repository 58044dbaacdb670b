//! Monte Carlo estimation of the circle/rectangle hit ratio, plus report layout.
//!
//! Pipeline
//! - `region`: classify a point into Rectangle, Circle or Other.
//! - `trial`: draw N uniform points over the sampling area and tally regions.
//! - `experiment`: repeat trials per sample size and record estimates/probabilities.
//! - `stats`: per-size mean of the estimates.
//! - `report`: lay the results out on a fixed-column sheet (clear, then write).
//! - `chart`: plot-friendly artifacts handed to an external renderer.
//!
//! The circle has area π and the rectangle area 1, so `circle / rectangle`
//! converges to π as N grows.

pub mod api;
pub mod cfg;
pub mod chart;
pub mod error;
pub mod experiment;
pub mod region;
pub mod report;
pub mod stats;
pub mod trial;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::SimError;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::experiment::{
        run_experiments, ExperimentResult, ExperimentRun, ProbabilityRecord, RunConfig, SampleSize,
    };
    pub use crate::region::{classify, Region};
    pub use crate::report::{write_report, ReportSheet, Sheet, SheetLayout, Workbook};
    pub use crate::stats::{mean_estimate, summarize, AggregateStats};
    pub use crate::trial::{run_trial, RegionTally, TrialSource, UniformTrials};
}
