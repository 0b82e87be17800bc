//! Repeated trials and the threshold estimate built from them.
//!
//! [`PercolationStats`] runs every trial eagerly at construction, then keeps
//! the per-trial thresholds together with their sample mean, sample standard
//! deviation, and 95% confidence interval.
//!
//! # Seeding
//!
//! Seeded runs give trial `i` its own [`SmallRng`] seeded with
//! [`trial_seed`]`(seed, i)`. A trial's randomness therefore depends only on
//! its index, and the sequential and rayon executors produce identical
//! samples in identical order.
//!
//! # Small samples
//!
//! The standard deviation divides by `trials - 1`. With a single trial it is
//! `NaN`, and so are both confidence bounds.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{SamplingStrategy, StatsConfig};
use crate::error::StatsError;
use crate::sampler::{PermutationSampler, SiteSampler, UniformSampler};
use crate::trial::run_trial;

/// Two-sided 95% z-value used for the confidence interval.
pub const CONFIDENCE_95_Z: f64 = 1.96;

/// Threshold estimate from a completed batch of trials.
#[derive(Debug, Clone, PartialEq)]
pub struct PercolationStats {
    grid_size: usize,
    thresholds: Vec<f64>,
    mean: f64,
    stddev: f64,
    seed: Option<u64>,
}

/// Serializable snapshot of a [`PercolationStats`] run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    /// Side length of each grid.
    pub grid_size: usize,
    /// Number of trials.
    pub trials: usize,
    /// Sample mean threshold.
    pub mean: f64,
    /// Sample standard deviation.
    pub stddev: f64,
    /// Low end of the 95% confidence interval.
    pub confidence_lo: f64,
    /// High end of the 95% confidence interval.
    pub confidence_hi: f64,
    /// Base seed, when the run was seeded.
    pub seed: Option<u64>,
}

impl PercolationStats {
    /// Run `trials` trials on n-by-n grids with a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidGridSize`] if `n` is zero or
    /// [`StatsError::InvalidTrialCount`] if `trials` is zero.
    pub fn new(n: usize, trials: usize) -> Result<Self, StatsError> {
        Self::from_config(&StatsConfig::new(n, trials))
    }

    /// Run `trials` trials from a fixed base seed.
    pub fn with_seed(n: usize, trials: usize, seed: u64) -> Result<Self, StatsError> {
        let config = StatsConfig {
            seed: Some(seed),
            ..StatsConfig::new(n, trials)
        };
        Self::from_config(&config)
    }

    /// Run the trials described by `config`.
    ///
    /// A missing seed is drawn once from the thread-local generator and
    /// recorded in the result.
    pub fn from_config(config: &StatsConfig) -> Result<Self, StatsError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());

        info!(
            grid_size = config.grid_size,
            trials = config.trials,
            seed,
            sampling = ?config.sampling,
            parallel = config.parallel,
            "Percolation trials starting"
        );

        let thresholds = if config.parallel {
            run_parallel(config, seed)?
        } else {
            run_sequential(config, seed)?
        };

        let stats = Self::from_thresholds(config.grid_size, thresholds, Some(seed));
        info!(
            mean = stats.mean,
            stddev = stats.stddev,
            confidence_lo = stats.confidence_lo(),
            confidence_hi = stats.confidence_hi(),
            "Percolation trials complete"
        );
        Ok(stats)
    }

    /// Run `trials` trials drawing every candidate site from `sampler`.
    pub fn with_sampler<S>(n: usize, trials: usize, sampler: &mut S) -> Result<Self, StatsError>
    where
        S: SiteSampler + ?Sized,
    {
        StatsConfig::new(n, trials).validate()?;
        let thresholds = (0..trials)
            .map(|trial| {
                let outcome = run_trial(n, sampler)?;
                debug!(trial, open_sites = outcome.open_sites, "Trial complete");
                Ok(outcome.threshold)
            })
            .collect::<Result<Vec<_>, StatsError>>()?;
        Ok(Self::from_thresholds(n, thresholds, None))
    }

    fn from_thresholds(grid_size: usize, thresholds: Vec<f64>, seed: Option<u64>) -> Self {
        let mean = sample_mean(&thresholds);
        let stddev = sample_stddev(&thresholds);
        Self {
            grid_size,
            thresholds,
            mean,
            stddev,
            seed,
        }
    }

    /// Sample mean of the percolation threshold.
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of the percolation threshold.
    ///
    /// `NaN` when only one trial was run.
    pub const fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.mean - self.half_width()
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.mean + self.half_width()
    }

    /// Number of trials run.
    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Side length of each trial's grid.
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Per-trial thresholds, in trial order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Base seed, or `None` when trials were driven by a caller's sampler.
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Serializable summary of this run.
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            grid_size: self.grid_size,
            trials: self.trials(),
            mean: self.mean,
            stddev: self.stddev,
            confidence_lo: self.confidence_lo(),
            confidence_hi: self.confidence_hi(),
            seed: self.seed,
        }
    }

    fn half_width(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let trials = self.thresholds.len() as f64;
        CONFIDENCE_95_Z * self.stddev / trials.sqrt()
    }
}

/// Derive the seed for trial `trial` from a base seed (`splitmix64`).
///
/// Distinct trials get well-separated seeds even for adjacent base seeds.
pub const fn trial_seed(base: u64, trial: u64) -> u64 {
    let mut z = base.wrapping_add(trial.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Arithmetic mean. `NaN` for an empty slice.
pub fn sample_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    values.iter().sum::<f64>() / count
}

/// Bessel-corrected standard deviation. `NaN` for fewer than two values.
pub fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = sample_mean(values);
    let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    #[allow(clippy::cast_precision_loss)]
    let degrees_of_freedom = values.len().saturating_sub(1) as f64;
    (squared / degrees_of_freedom).sqrt()
}

/// Run trial `index` with its own generator derived from `seed`.
fn run_seeded_trial(
    grid_size: usize,
    sampling: SamplingStrategy,
    seed: u64,
    index: usize,
) -> Result<f64, StatsError> {
    let rng = SmallRng::seed_from_u64(trial_seed(seed, index as u64));
    let outcome = match sampling {
        SamplingStrategy::WithReplacement => run_trial(grid_size, &mut UniformSampler::new(rng))?,
        SamplingStrategy::Permutation => run_trial(grid_size, &mut PermutationSampler::new(rng))?,
    };
    debug!(
        trial = index,
        open_sites = outcome.open_sites,
        draws = outcome.draws,
        threshold = outcome.threshold,
        "Trial complete"
    );
    Ok(outcome.threshold)
}

fn run_sequential(config: &StatsConfig, seed: u64) -> Result<Vec<f64>, StatsError> {
    (0..config.trials)
        .map(|index| run_seeded_trial(config.grid_size, config.sampling, seed, index))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_parallel(config: &StatsConfig, seed: u64) -> Result<Vec<f64>, StatsError> {
    use rayon::prelude::*;

    (0..config.trials)
        .into_par_iter()
        .map(|index| run_seeded_trial(config.grid_size, config.sampling, seed, index))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(config: &StatsConfig, seed: u64) -> Result<Vec<f64>, StatsError> {
    tracing::warn!("built without the `parallel` feature, running trials sequentially");
    run_sequential(config, seed)
}
