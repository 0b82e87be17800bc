//! Replay of a recorded open sequence.
//!
//! The input is whitespace-separated integers: the grid size `n`, then any
//! number of `row col` pairs. Each pair is echoed and opened in order.

use std::io::Write;

use percolation_grid::{FullnessPolicy, Percolation, Site};
use serde::Serialize;
use tracing::info;

use crate::error::CliError;

/// A parsed replay file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayScript {
    pub n: usize,
    pub sites: Vec<Site>,
}

/// Final state after a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub n: usize,
    pub open_sites: usize,
    pub full_sites: usize,
    pub percolates: bool,
}

pub fn parse_script(input: &str) -> Result<ReplayScript, CliError> {
    let mut tokens = input
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| (index.saturating_add(1), token));

    let (_, first) = tokens.next().ok_or(CliError::ReplayEmpty)?;
    let n = parse_index(1, first)?;

    let mut sites = Vec::new();
    while let Some((position, row_token)) = tokens.next() {
        let row = parse_index(position, row_token)?;
        let (col_position, col_token) = tokens
            .next()
            .ok_or(CliError::ReplayIncomplete { position })?;
        let col = parse_index(col_position, col_token)?;
        sites.push(Site::new(row, col));
    }

    Ok(ReplayScript { n, sites })
}

fn parse_index(position: usize, token: &str) -> Result<usize, CliError> {
    token
        .parse::<usize>()
        .map_err(|_parse| CliError::ReplayToken {
            position,
            token: token.to_owned(),
        })
}

/// Open every site in `script`, echoing each pair to `out`.
pub fn replay<W: Write>(
    script: &ReplayScript,
    policy: FullnessPolicy,
    out: &mut W,
) -> Result<ReplayReport, CliError> {
    let mut grid = Percolation::with_policy(script.n, policy)?;
    info!(n = script.n, pairs = script.sites.len(), ?policy, "Replay loaded");

    for (index, &site) in script.sites.iter().enumerate() {
        writeln!(out, "{} {}", site.row, site.col)?;
        grid.open_site(site).map_err(|source| CliError::ReplaySite {
            pair: index.saturating_add(1),
            source,
        })?;
    }

    let mut full_sites: usize = 0;
    for row in 1..=script.n {
        for col in 1..=script.n {
            if grid.is_full(row, col)? {
                full_sites = full_sites.saturating_add(1);
            }
        }
    }

    Ok(ReplayReport {
        n: script.n,
        open_sites: grid.number_of_open_sites(),
        full_sites,
        percolates: grid.percolates(),
    })
}
