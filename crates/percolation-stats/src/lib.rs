//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial fills a fresh [`Percolation`] grid with randomly chosen open
//! sites until it percolates and records the fraction of sites that were
//! open. Over many trials the mean of those fractions estimates the
//! threshold (about 0.593 for large square lattices).
//!
//! # Modules
//!
//! - [`config`] -- [`StatsConfig`] loading from YAML with environment
//!   overrides, and the [`SamplingStrategy`] choice.
//! - [`error`] -- [`StatsError`] for invalid arguments and failed trials.
//! - [`sampler`] -- The [`SiteSampler`] trait with uniform, permutation, and
//!   scripted implementations.
//! - [`stats`] -- [`PercolationStats`], which runs the batch and reports mean,
//!   standard deviation, and a 95% confidence interval.
//! - [`trial`] -- [`run_trial`], a single grid filled until it percolates.
//!
//! [`Percolation`]: percolation_grid::Percolation

pub mod config;
pub mod error;
pub mod sampler;
pub mod stats;
pub mod trial;

// Re-export primary types at crate root.
pub use config::{ConfigError, SamplingStrategy, StatsConfig};
pub use error::StatsError;
pub use sampler::{PermutationSampler, ScriptedSampler, SiteSampler, UniformSampler};
pub use stats::{CONFIDENCE_95_Z, PercolationStats, StatsSummary, trial_seed};
pub use trial::{TrialOutcome, run_trial};
