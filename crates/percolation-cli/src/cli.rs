//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use percolation_grid::FullnessPolicy;
use percolation_stats::{SamplingStrategy, StatsConfig};

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "percolation")]
#[command(version, about = "Estimate percolation thresholds on square lattices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run randomized trials and report the threshold estimate
    Stats(StatsArgs),

    /// Open the sites listed in a file and report the final state
    Replay {
        /// File holding a grid size followed by row/column pairs
        path: PathBuf,

        /// How full sites are determined
        #[arg(long, value_enum, default_value_t = PolicyArg::Shared)]
        policy: PolicyArg,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Grid side length
    #[arg(required_unless_present = "config")]
    pub n: Option<usize>,

    /// Number of trials
    #[arg(required_unless_present = "config")]
    pub trials: Option<usize>,

    /// YAML file with trial settings
    #[arg(long, env = "PERCOLATION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Site selection strategy
    #[arg(long, value_enum)]
    pub sampling: Option<SamplingArg>,

    /// Run trials on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Run trials on one thread, even if the config enables parallel mode
    #[arg(long, conflicts_with = "parallel")]
    pub no_parallel: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsArgs {
    /// Merge the config file (if any), environment overrides, and flags.
    ///
    /// Flags given on the command line win over everything else.
    pub fn resolve(&self) -> Result<StatsConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => StatsConfig::from_file(path)?,
            None => {
                let mut config = StatsConfig::default();
                config.apply_env_overrides()?;
                config
            }
        };
        self.apply_flags(&mut config);
        Ok(config)
    }

    fn apply_flags(&self, config: &mut StatsConfig) {
        if let Some(n) = self.n {
            config.grid_size = n;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(sampling) = self.sampling {
            config.sampling = sampling.into();
        }
        if self.parallel {
            config.parallel = true;
        } else if self.no_parallel {
            config.parallel = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingArg {
    /// Uniform draws, repeats discarded
    WithReplacement,
    /// Shuffled order, each site once
    Permutation,
}

impl From<SamplingArg> for SamplingStrategy {
    fn from(arg: SamplingArg) -> Self {
        match arg {
            SamplingArg::WithReplacement => Self::WithReplacement,
            SamplingArg::Permutation => Self::Permutation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Share the percolation structure (bottom-row backwash possible)
    Shared,
    /// Separate structure without the virtual bottom
    Isolated,
}

impl From<PolicyArg> for FullnessPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Shared => Self::Shared,
            PolicyArg::Isolated => Self::Isolated,
        }
    }
}
