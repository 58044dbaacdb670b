//! Trial generator: N uniform points over the sampling area, tallied by region.
//!
//! Model
//! - `x ~ U[-2, 4)`, `y ~ U[-2, 2)`, drawn independently per point.
//! - The generator is an explicit `Rng` parameter; seed a `StdRng` for
//!   reproducible runs.
//!
//! The `TrialSource` trait is the seam the experiment runner depends on, so a
//! run can be driven by a seeded sampler or by prepared tallies.

use nalgebra::Vector2;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::cfg::{X_MAX, X_MIN, Y_MAX, Y_MIN};
use crate::error::SimError;
use crate::region::{classify, Region};

/// Hit counts of one trial. `rectangle + circle + other == n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegionTally {
    pub rectangle: u64,
    pub circle: u64,
    pub other: u64,
}

impl RegionTally {
    #[inline]
    pub fn record(&mut self, region: Region) {
        match region {
            Region::Rectangle => self.rectangle += 1,
            Region::Circle => self.circle += 1,
            Region::Other => self.other += 1,
        }
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.rectangle + self.circle + self.other
    }
}

/// Uniform distribution over the fixed sampling rectangle.
#[derive(Clone, Copy, Debug)]
pub struct SamplingArea {
    x: Uniform<f64>,
    y: Uniform<f64>,
}

impl Default for SamplingArea {
    fn default() -> Self {
        Self {
            x: Uniform::new(X_MIN, X_MAX),
            y: Uniform::new(Y_MIN, Y_MAX),
        }
    }
}

impl SamplingArea {
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        let x = self.x.sample(rng);
        let y = self.y.sample(rng);
        Vector2::new(x, y)
    }
}

/// Draw `n` points and tally their regions.
pub fn run_trial<R: Rng + ?Sized>(n: u64, rng: &mut R) -> Result<RegionTally, SimError> {
    if n == 0 {
        return Err(SimError::invalid("sample size must be > 0"));
    }
    let area = SamplingArea::default();
    let mut tally = RegionTally::default();
    for _ in 0..n {
        tally.record(classify(area.sample(rng)));
    }
    debug_assert_eq!(tally.total(), n);
    Ok(tally)
}

/// Source of trial tallies consumed by the experiment runner.
pub trait TrialSource {
    fn run_trial(&mut self, n: u64) -> Result<RegionTally, SimError>;
}

/// Uniform point sampler backed by an explicit generator.
pub struct UniformTrials<R> {
    rng: R,
}

impl<R: Rng> UniformTrials<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl UniformTrials<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TrialSource for UniformTrials<R> {
    fn run_trial(&mut self, n: u64) -> Result<RegionTally, SimError> {
        run_trial(n, &mut self.rng)
    }
}

/// Replays prepared tallies in order; used to pin exact scenarios in tests.
#[cfg(test)]
pub(crate) struct ScriptedTrials {
    pub tallies: std::collections::VecDeque<RegionTally>,
}

#[cfg(test)]
impl ScriptedTrials {
    pub fn new(tallies: impl IntoIterator<Item = RegionTally>) -> Self {
        Self {
            tallies: tallies.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl TrialSource for ScriptedTrials {
    fn run_trial(&mut self, n: u64) -> Result<RegionTally, SimError> {
        let tally = self
            .tallies
            .pop_front()
            .ok_or_else(|| SimError::invalid("script exhausted"))?;
        assert_eq!(tally.total(), n, "scripted tally does not match N");
        Ok(tally)
    }
}
