//! Console output for finished runs.

use std::io::Write;

use percolation_stats::StatsSummary;

use crate::error::CliError;
use crate::replay::ReplayReport;

/// Print the threshold estimate in the aligned three-line layout.
pub fn write_stats<W: Write>(summary: &StatsSummary, out: &mut W) -> Result<(), CliError> {
    writeln!(out, "mean                    = {}", summary.mean)?;
    writeln!(out, "stddev                  = {}", summary.stddev)?;
    writeln!(
        out,
        "95% confidence interval = {}, {}",
        summary.confidence_lo, summary.confidence_hi
    )?;
    Ok(())
}

/// Print the final replay state in the same aligned layout.
pub fn write_replay<W: Write>(report: &ReplayReport, out: &mut W) -> Result<(), CliError> {
    writeln!(out, "open sites              = {}", report.open_sites)?;
    writeln!(out, "full sites              = {}", report.full_sites)?;
    writeln!(out, "percolates              = {}", report.percolates)?;
    Ok(())
}

/// Print any serializable report as a single JSON line.
pub fn write_json<T, W>(value: &T, out: &mut W) -> Result<(), CliError>
where
    T: serde::Serialize,
    W: Write,
{
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
