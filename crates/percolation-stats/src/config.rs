//! Configuration for a batch of percolation trials.
//!
//! [`StatsConfig`] can be built in code or deserialized from YAML:
//!
//! ```yaml
//! grid_size: 200
//! trials: 100
//! seed: 42            # optional; drawn from OS entropy when absent
//! sampling: permutation
//! parallel: true
//! ```
//!
//! Every field has a default, so an empty document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Environment variable that overrides [`StatsConfig::seed`].
pub const SEED_ENV: &str = "PERCOLATION_SEED";

/// Environment variable that overrides [`StatsConfig::parallel`].
pub const PARALLEL_ENV: &str = "PERCOLATION_PARALLEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value of the wrong type.
    #[error("invalid value {value:?} for {variable}")]
    InvalidOverride {
        /// The variable name.
        variable: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// How each trial picks the next site to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Draw uniformly from all sites; already-open picks are discarded.
    #[default]
    WithReplacement,
    /// Shuffle all sites once per trial and open them in that order.
    Permutation,
}

/// Parameters for a batch of trials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsConfig {
    /// Side length of each trial's grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    /// Number of independent trials.
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Base seed. Trial `i` derives its own generator from this value.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Site selection strategy.
    #[serde(default)]
    pub sampling: SamplingStrategy,

    /// Run trials on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

const fn default_grid_size() -> usize {
    200
}

const fn default_trials() -> usize {
    100
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            trials: default_trials(),
            seed: None,
            sampling: SamplingStrategy::default(),
            parallel: false,
        }
    }
}

impl StatsConfig {
    /// Config for `trials` runs on an n-by-n grid, other fields defaulted.
    pub fn new(grid_size: usize, trials: usize) -> Self {
        Self {
            grid_size,
            trials,
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// - `PERCOLATION_SEED` overrides `seed`
    /// - `PERCOLATION_PARALLEL` overrides `parallel`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(SEED_ENV) {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_parse| ConfigError::InvalidOverride {
                    variable: SEED_ENV,
                    value: value.clone(),
                })?;
            self.seed = Some(seed);
        }

        if let Some(value) = lookup(PARALLEL_ENV) {
            let parallel = value
                .trim()
                .parse::<bool>()
                .map_err(|_parse| ConfigError::InvalidOverride {
                    variable: PARALLEL_ENV,
                    value: value.clone(),
                })?;
            self.parallel = parallel;
        }

        Ok(())
    }

    /// Check that the grid size and trial count are both at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidGridSize`] or
    /// [`StatsError::InvalidTrialCount`].
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.grid_size == 0 {
            return Err(StatsError::InvalidGridSize { n: self.grid_size });
        }
        if self.trials == 0 {
            return Err(StatsError::InvalidTrialCount {
                trials: self.trials,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = StatsConfig::parse("").unwrap();
        assert_eq!(config, StatsConfig::default());
        assert_eq!(config.grid_size, 200);
        assert_eq!(config.trials, 100);
        assert_eq!(config.seed, None);
        assert_eq!(config.sampling, SamplingStrategy::WithReplacement);
        assert!(!config.parallel);
    }

    #[test]
    fn full_document_parses() {
        let yaml = "grid_size: 50\ntrials: 30\nseed: 9\nsampling: permutation\nparallel: true\n";
        let config = StatsConfig::parse(yaml).unwrap();
        assert_eq!(config.grid_size, 50);
        assert_eq!(config.trials, 30);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sampling, SamplingStrategy::Permutation);
        assert!(config.parallel);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config = StatsConfig::parse("trials: 7\n").unwrap();
        assert_eq!(config.trials, 7);
        assert_eq!(config.grid_size, 200);
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let err = StatsConfig::parse("grid_size: [not a number").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn overrides_replace_seed_and_parallel() {
        let mut config = StatsConfig::new(10, 5);
        config
            .apply_overrides(lookup_from(&[(SEED_ENV, " 1234 "), (PARALLEL_ENV, "true")]))
            .unwrap();
        assert_eq!(config.seed, Some(1234));
        assert!(config.parallel);
    }

    #[test]
    fn missing_overrides_leave_config_alone() {
        let mut config = StatsConfig::new(10, 5);
        config.apply_overrides(lookup_from(&[])).unwrap();
        assert_eq!(config, StatsConfig::new(10, 5));
    }

    #[test]
    fn bad_override_is_reported() {
        let mut config = StatsConfig::new(10, 5);
        let err = config
            .apply_overrides(lookup_from(&[(SEED_ENV, "forty-two")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride { variable: SEED_ENV, .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = StatsConfig::from_file(Path::new("/nonexistent/percolation.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn validate_rejects_zero_values() {
        assert!(StatsConfig::new(1, 1).validate().is_ok());
        assert!(matches!(
            StatsConfig::new(0, 3).validate(),
            Err(StatsError::InvalidGridSize { n: 0 })
        ));
        assert!(matches!(
            StatsConfig::new(3, 0).validate(),
            Err(StatsError::InvalidTrialCount { trials: 0 })
        ));
    }
}
