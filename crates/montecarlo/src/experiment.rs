//! Experiment runner: M trials per sample size, over an ordered size list.
//!
//! Iteration is size-major (all experiments for the first size, then the next
//! size). Every `ProbabilityRecord` carries its 1-based round so the report can
//! regroup by round regardless of that order.
//!
//! Degenerate policy
//! - A trial with zero rectangle hits yields estimate `0.0`. This is logged,
//!   not raised.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::cfg::DEFAULT_SAMPLE_SIZES;
use crate::error::SimError;
use crate::trial::{RegionTally, TrialSource, UniformTrials};

/// Number of points drawn per trial. Always > 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SampleSize(u64);

impl SampleSize {
    pub fn new(n: u64) -> Result<Self, SimError> {
        if n == 0 {
            return Err(SimError::invalid("sample size must be > 0"));
        }
        Ok(Self(n))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SampleSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One experiment: a single trial reduced to an estimate and three probabilities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExperimentResult {
    pub sample_size: SampleSize,
    /// 1-based index within its sample size.
    pub experiment: u32,
    pub tally: RegionTally,
    /// `circle / rectangle`, or 0 when the rectangle was never hit.
    pub estimate: f64,
    pub prob_circle: f64,
    pub prob_rectangle: f64,
    pub prob_union: f64,
}

impl ExperimentResult {
    pub fn from_tally(sample_size: SampleSize, experiment: u32, tally: RegionTally) -> Self {
        let n = sample_size.get() as f64;
        let estimate = if tally.rectangle > 0 {
            tally.circle as f64 / tally.rectangle as f64
        } else {
            0.0
        };
        Self {
            sample_size,
            experiment,
            tally,
            estimate,
            prob_circle: tally.circle as f64 / n,
            prob_rectangle: tally.rectangle as f64 / n,
            prob_union: (tally.circle + tally.rectangle) as f64 / n,
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.tally.rectangle == 0
    }

    pub fn probability_record(&self) -> ProbabilityRecord {
        ProbabilityRecord {
            round: self.experiment,
            sample_size: self.sample_size,
            circle: self.prob_circle,
            rectangle: self.prob_rectangle,
            union: self.prob_union,
        }
    }
}

/// Flattened probabilities keyed by `(round, sample_size)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProbabilityRecord {
    pub round: u32,
    pub sample_size: SampleSize,
    pub circle: f64,
    pub rectangle: f64,
    pub union: f64,
}

/// All results of one run, held in memory until the report is written.
#[derive(Clone, Debug, Default)]
pub struct ExperimentRun {
    sample_sizes: Vec<SampleSize>,
    results: HashMap<SampleSize, Vec<ExperimentResult>>,
    probabilities: Vec<ProbabilityRecord>,
}

impl ExperimentRun {
    /// Sizes in configured order.
    pub fn sample_sizes(&self) -> &[SampleSize] {
        &self.sample_sizes
    }

    pub fn results_for(&self, size: SampleSize) -> Option<&[ExperimentResult]> {
        self.results.get(&size).map(Vec::as_slice)
    }

    /// `(size, results)` pairs in configured order.
    pub fn series(&self) -> impl Iterator<Item = (SampleSize, &[ExperimentResult])> + '_ {
        self.sample_sizes
            .iter()
            .map(move |s| (*s, self.results_for(*s).unwrap_or(&[])))
    }

    pub fn probabilities(&self) -> &[ProbabilityRecord] {
        &self.probabilities
    }

    /// Highest round present, 0 for an empty run.
    pub fn rounds(&self) -> u32 {
        self.probabilities
            .iter()
            .map(|p| p.round)
            .max()
            .unwrap_or(0)
    }
}

/// Validate the size list and experiment count without running anything.
pub fn validate_plan(sizes: &[SampleSize], experiment_count: u32) -> Result<(), SimError> {
    if experiment_count == 0 {
        return Err(SimError::invalid("experiment count must be > 0"));
    }
    if sizes.is_empty() {
        return Err(SimError::invalid("need at least one sample size"));
    }
    let mut seen = HashSet::with_capacity(sizes.len());
    for s in sizes {
        if !seen.insert(*s) {
            return Err(SimError::invalid(format!("duplicate sample size {s}")));
        }
    }
    Ok(())
}

/// Run `experiment_count` trials for every size, in order.
pub fn run_experiments<T: TrialSource + ?Sized>(
    sizes: &[SampleSize],
    experiment_count: u32,
    source: &mut T,
) -> Result<ExperimentRun, SimError> {
    validate_plan(sizes, experiment_count)?;
    let mut run = ExperimentRun {
        sample_sizes: sizes.to_vec(),
        results: HashMap::with_capacity(sizes.len()),
        probabilities: Vec::with_capacity(sizes.len() * experiment_count as usize),
    };
    for &size in sizes {
        tracing::info!(n = size.get(), experiments = experiment_count, "running experiments");
        let mut series = Vec::with_capacity(experiment_count as usize);
        for experiment in 1..=experiment_count {
            let tally = source.run_trial(size.get())?;
            let result = ExperimentResult::from_tally(size, experiment, tally);
            if result.is_degenerate() {
                tracing::warn!(
                    n = size.get(),
                    experiment,
                    "no rectangle hits; estimate reported as 0"
                );
            }
            tracing::debug!(
                n = size.get(),
                experiment,
                estimate = result.estimate,
                "experiment done"
            );
            run.probabilities.push(result.probability_record());
            series.push(result);
        }
        run.results.insert(size, series);
    }
    Ok(run)
}

/// Run parameters: which sizes, how many experiments each, and the seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub sample_sizes: Vec<u64>,
    pub experiments: u32,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_sizes: DEFAULT_SAMPLE_SIZES.to_vec(),
            experiments: 1,
            seed: 0,
        }
    }
}

impl RunConfig {
    /// Typed sizes after validating the whole plan.
    pub fn validate(&self) -> Result<Vec<SampleSize>, SimError> {
        let sizes = self
            .sample_sizes
            .iter()
            .map(|&n| SampleSize::new(n))
            .collect::<Result<Vec<_>, _>>()?;
        validate_plan(&sizes, self.experiments)?;
        Ok(sizes)
    }

    /// Run with a `StdRng` seeded from `self.seed`.
    pub fn run(&self) -> Result<ExperimentRun, SimError> {
        let sizes = self.validate()?;
        let mut source = UniformTrials::seeded(self.seed);
        run_experiments(&sizes, self.experiments, &mut source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::ScriptedTrials;
    use proptest::prelude::*;

    fn sizes(ns: &[u64]) -> Vec<SampleSize> {
        ns.iter().map(|&n| SampleSize::new(n).unwrap()).collect()
    }

    fn tally(rectangle: u64, circle: u64, n: u64) -> RegionTally {
        RegionTally {
            rectangle,
            circle,
            other: n - rectangle - circle,
        }
    }

    #[test]
    fn pinned_scenario_estimate_and_probabilities() {
        let mut src = ScriptedTrials::new([tally(40, 785, 1000)]);
        let run = run_experiments(&sizes(&[1000]), 1, &mut src).unwrap();
        let r = run.results_for(SampleSize::new(1000).unwrap()).unwrap()[0];
        assert_eq!(r.estimate, 19.625);
        assert_eq!(r.prob_circle, 0.785);
        assert_eq!(r.prob_rectangle, 0.04);
        assert_eq!(r.prob_union, 0.825);
        assert_eq!(run.probabilities().len(), 1);
        assert_eq!(run.probabilities()[0].round, 1);
    }

    #[test]
    fn zero_rectangle_hits_gives_zero_estimate() {
        let r = ExperimentResult::from_tally(SampleSize::new(10).unwrap(), 1, tally(0, 7, 10));
        assert_eq!(r.estimate, 0.0);
        assert!(r.is_degenerate());
        assert_eq!(r.prob_circle, 0.7);
    }

    #[test]
    fn rounds_are_tagged_per_size_in_size_major_order() {
        let mut src = UniformTrials::seeded(9);
        let run = run_experiments(&sizes(&[100, 200]), 3, &mut src).unwrap();
        let tags: Vec<(u32, u64)> = run
            .probabilities()
            .iter()
            .map(|p| (p.round, p.sample_size.get()))
            .collect();
        assert_eq!(
            tags,
            vec![(1, 100), (2, 100), (3, 100), (1, 200), (2, 200), (3, 200)]
        );
        assert_eq!(run.rounds(), 3);
        let order: Vec<u64> = run.series().map(|(s, _)| s.get()).collect();
        assert_eq!(order, vec![100, 200]);
        for (_, series) in run.series() {
            let idx: Vec<u32> = series.iter().map(|r| r.experiment).collect();
            assert_eq!(idx, vec![1, 2, 3]);
        }
    }

    #[test]
    fn invalid_inputs_fail_before_any_trial() {
        let mut src = ScriptedTrials::new(Vec::<RegionTally>::new());
        assert!(matches!(
            run_experiments(&sizes(&[100]), 0, &mut src),
            Err(SimError::InvalidInput { .. })
        ));
        assert!(matches!(
            run_experiments(&[], 2, &mut src),
            Err(SimError::InvalidInput { .. })
        ));
        assert!(matches!(
            run_experiments(&sizes(&[100, 100]), 2, &mut src),
            Err(SimError::InvalidInput { .. })
        ));
        assert!(SampleSize::new(0).is_err());
        let cfg = RunConfig {
            sample_sizes: vec![1000, 0],
            ..RunConfig::default()
        };
        assert!(matches!(cfg.run(), Err(SimError::InvalidInput { .. })));
    }

    #[test]
    fn trial_failure_aborts_the_run() {
        // Script runs dry after the first experiment.
        let mut src = ScriptedTrials::new([tally(1, 3, 10)]);
        assert!(run_experiments(&sizes(&[10]), 2, &mut src).is_err());
    }

    #[test]
    fn config_run_is_reproducible() {
        let cfg = RunConfig {
            sample_sizes: vec![500, 1500],
            experiments: 2,
            seed: 11,
        };
        let a = cfg.run().unwrap();
        let b = cfg.run().unwrap();
        assert_eq!(a.probabilities(), b.probabilities());
    }

    proptest! {
        #[test]
        fn union_is_sum_of_disjoint_probabilities(
            n in 1u64..1_000_000,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            let circle = (a * n as f64) as u64;
            let rectangle = ((n - circle) as f64 * b) as u64;
            let r = ExperimentResult::from_tally(
                SampleSize::new(n).unwrap(),
                1,
                tally(rectangle, circle, n),
            );
            prop_assert!((r.prob_union - (r.prob_circle + r.prob_rectangle)).abs() < 1e-12);
            prop_assert!(r.prob_union <= 1.0);
        }
    }
}
