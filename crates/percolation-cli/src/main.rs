//! Command-line front end for percolation experiments.
//!
//! Two subcommands:
//!
//! - `percolation stats <N> <TRIALS>` runs randomized trials and prints the
//!   mean threshold, its standard deviation, and a 95% confidence interval.
//!   Settings can also come from a YAML file (`--config`), with
//!   `PERCOLATION_SEED` and `PERCOLATION_PARALLEL` overriding it.
//! - `percolation replay <FILE>` opens the sites listed in a file and reports
//!   the final grid state.
//!
//! Results go to stdout. Logs go to stderr, filtered by `RUST_LOG`
//! (default `info`).

mod cli;
mod error;
mod replay;
mod report;

use std::io::Write;

use clap::Parser;
use percolation_stats::PercolationStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, StatsArgs};
use crate::error::CliError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if arguments, configuration, or the run itself fail.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Stats(args) => run_stats(&args, &mut out)?,
        Commands::Replay { path, policy, json } => {
            let input = std::fs::read_to_string(&path).map_err(CliError::from)?;
            let script = replay::parse_script(&input)?;
            let report = replay::replay(&script, policy.into(), &mut out)?;
            info!(
                path = %path.display(),
                open_sites = report.open_sites,
                percolates = report.percolates,
                "Replay finished"
            );
            if json {
                report::write_json(&report, &mut out)?;
            } else {
                report::write_replay(&report, &mut out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn run_stats<W: Write>(args: &StatsArgs, out: &mut W) -> Result<(), CliError> {
    let config = args.resolve()?;
    let stats = PercolationStats::from_config(&config)?;
    let summary = stats.summary();
    if args.json {
        report::write_json(&summary, out)
    } else {
        report::write_stats(&summary, out)
    }
}
