//! Error types for the `percolation` binary.
//!
//! [`CliError`] wraps every failure `main` can propagate with `?`.

use percolation_grid::GridError;
use percolation_stats::{ConfigError, StatsError};

/// Top-level error for the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The trial batch failed.
    #[error("stats error: {source}")]
    Stats {
        /// The underlying stats error.
        #[from]
        source: StatsError,
    },

    /// A grid could not be built.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// Reading input or writing output failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The summary could not be serialized.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serializer error.
        #[from]
        source: serde_json::Error,
    },

    /// The replay file has no grid size.
    #[error("replay input is empty")]
    ReplayEmpty,

    /// A replay token is not a non-negative integer.
    #[error("replay token {position} is not a valid index: {token:?}")]
    ReplayToken {
        /// 1-based token position in the file.
        position: usize,
        /// The offending token.
        token: String,
    },

    /// The replay file ends halfway through a `(row, col)` pair.
    #[error("replay token {position} has no matching column")]
    ReplayIncomplete {
        /// 1-based position of the unpaired row token.
        position: usize,
    },

    /// A replayed pair was rejected by the grid.
    #[error("replay pair {pair} rejected: {source}")]
    ReplaySite {
        /// 1-based pair number.
        pair: usize,
        /// Why the grid rejected it.
        source: GridError,
    },
}
