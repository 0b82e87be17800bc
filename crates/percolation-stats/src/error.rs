//! Error types for the `percolation-stats` crate.
//!
//! [`StatsError`] covers argument validation, sampler exhaustion, and wraps
//! the grid and configuration errors raised underneath it.

use percolation_grid::GridError;

use crate::config::ConfigError;

/// Errors that can occur while running percolation trials.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// The grid size must be at least 1.
    #[error("grid size must be at least 1, got {n}")]
    InvalidGridSize {
        /// The rejected size.
        n: usize,
    },

    /// The trial count must be at least 1.
    #[error("trial count must be at least 1, got {trials}")]
    InvalidTrialCount {
        /// The rejected count.
        trials: usize,
    },

    /// A site sampler ran out of candidates before the grid percolated.
    #[error("site sampler exhausted after {open_sites} open sites without percolation")]
    SamplerExhausted {
        /// Open sites at the moment the sampler ran dry.
        open_sites: usize,
    },

    /// A grid operation failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// Configuration could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },
}

impl StatsError {
    /// Whether this error rejected a construction argument.
    pub const fn is_invalid_argument(&self) -> bool {
        match self {
            Self::InvalidGridSize { .. } | Self::InvalidTrialCount { .. } => true,
            Self::Grid { source } => source.is_invalid_argument(),
            Self::SamplerExhausted { .. } | Self::Config { .. } => false,
        }
    }
}
