//! Curated surface for the orchestration binary.
//!
//! Not a stable API; prefer these re-exports so callers stay in sync when
//! modules move.

// Sampling and experiments
pub use crate::experiment::{
    run_experiments, validate_plan, ExperimentResult, ExperimentRun, ProbabilityRecord, RunConfig,
    SampleSize,
};
pub use crate::trial::{run_trial, RegionTally, TrialSource, UniformTrials};
// Aggregation
pub use crate::stats::{mean_estimate, summarize, AggregateStats};
// Report layout
pub use crate::report::{
    clear_region, evaluate, report_template, write_report, write_report_to, ReportError,
    ReportSheet, Sheet, SheetLayout, Workbook, WrittenReport, DEFAULT_SHEET_NAME,
};
// Charts
pub use crate::chart::{sample_scatter, ChartSink, ConvergenceChart, ScatterChart};
// Errors
pub use crate::error::SimError;
