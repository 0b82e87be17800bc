//! A single percolation trial.
//!
//! Build a fresh grid, open sampled sites until it percolates, and report the
//! fraction of sites that had to be opened. The loop terminates for any
//! sampler that eventually proposes every site, because a fully open grid
//! always percolates.

use percolation_grid::Percolation;
use serde::Serialize;

use crate::error::StatsError;
use crate::sampler::SiteSampler;

/// Result of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialOutcome {
    /// Open sites at the moment the grid first percolated.
    pub open_sites: usize,
    /// Candidates drawn from the sampler, including repeats.
    pub draws: u64,
    /// `open_sites / n^2`.
    pub threshold: f64,
}

/// Run one trial on a fresh n-by-n grid.
///
/// # Errors
///
/// Returns [`StatsError::InvalidGridSize`] if `n` is zero,
/// [`StatsError::SamplerExhausted`] if the sampler runs dry first, or
/// [`StatsError::Grid`] if the sampler proposes an out-of-bounds site.
pub fn run_trial<S>(n: usize, sampler: &mut S) -> Result<TrialOutcome, StatsError>
where
    S: SiteSampler + ?Sized,
{
    if n == 0 {
        return Err(StatsError::InvalidGridSize { n });
    }

    let mut grid = Percolation::new(n)?;
    sampler.begin_trial(n);

    let mut draws: u64 = 0;
    while !grid.percolates() {
        let site = sampler
            .next_site(n)
            .ok_or_else(|| StatsError::SamplerExhausted {
                open_sites: grid.number_of_open_sites(),
            })?;
        draws = draws.saturating_add(1);
        if !grid.is_open(site.row, site.col)? {
            grid.open_site(site)?;
        }
    }

    let open_sites = grid.number_of_open_sites();
    Ok(TrialOutcome {
        open_sites,
        draws,
        threshold: open_fraction(open_sites, n),
    })
}

/// Fraction of an n-by-n grid that `open_sites` represents.
pub(crate) fn open_fraction(open_sites: usize, n: usize) -> f64 {
    // Site counts are far below 2^52; the conversion is exact in practice.
    #[allow(clippy::cast_precision_loss)]
    let fraction = open_sites as f64 / (n as f64 * n as f64);
    fraction
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::sampler::{PermutationSampler, ScriptedSampler, UniformSampler};

    #[test]
    fn scripted_column_percolates_at_one_third() {
        let mut sampler = ScriptedSampler::new([(1, 1), (2, 1), (3, 1), (1, 2)]);
        let outcome = run_trial(3, &mut sampler).unwrap();
        assert_eq!(outcome.open_sites, 3);
        assert_eq!(outcome.draws, 3);
        assert!((outcome.threshold - 1.0 / 3.0).abs() < 1e-12);
        // The trial stops as soon as the grid percolates.
        assert_eq!(sampler.remaining(), 1);
    }

    #[test]
    fn repeated_candidates_count_as_draws_not_opens() {
        let mut sampler = ScriptedSampler::new([(1, 1), (1, 1), (2, 1), (1, 1), (3, 1)]);
        let outcome = run_trial(3, &mut sampler).unwrap();
        assert_eq!(outcome.open_sites, 3);
        assert_eq!(outcome.draws, 5);
    }

    #[test]
    fn single_site_grid_has_threshold_one() {
        let mut sampler = UniformSampler::new(SmallRng::seed_from_u64(3));
        let outcome = run_trial(1, &mut sampler).unwrap();
        assert_eq!(outcome.open_sites, 1);
        assert!((outcome.threshold - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exhausted_sampler_is_an_error() {
        let mut sampler = ScriptedSampler::new([(1, 1), (1, 2)]);
        let err = run_trial(3, &mut sampler).unwrap_err();
        assert!(matches!(err, StatsError::SamplerExhausted { open_sites: 2 }));
    }

    #[test]
    fn out_of_bounds_candidate_is_a_grid_error() {
        let mut sampler = ScriptedSampler::new([(4, 1)]);
        let err = run_trial(3, &mut sampler).unwrap_err();
        assert!(matches!(err, StatsError::Grid { .. }));
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut sampler = ScriptedSampler::default();
        let err = run_trial(0, &mut sampler).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn permutation_trial_never_wastes_draws() {
        let mut sampler = PermutationSampler::new(SmallRng::seed_from_u64(11));
        for _ in 0..20 {
            let outcome = run_trial(6, &mut sampler).unwrap();
            assert_eq!(u64::try_from(outcome.open_sites).unwrap(), outcome.draws);
            assert!(outcome.threshold > 0.0 && outcome.threshold <= 1.0);
        }
    }

    #[test]
    fn open_fraction_values() {
        assert!((open_fraction(2, 2) - 0.5).abs() < f64::EPSILON);
        assert!((open_fraction(25, 10) - 0.25).abs() < f64::EPSILON);
    }
}
