//! Site selection for percolation trials.
//!
//! A trial repeatedly asks a [`SiteSampler`] for a candidate site and opens
//! it if it is still closed. Swapping the sampler is how tests get
//! deterministic trials and how the two sampling strategies are chosen.

use std::collections::VecDeque;

use percolation_grid::Site;
use rand::Rng;
use rand::seq::SliceRandom;

/// A source of candidate sites for a trial.
pub trait SiteSampler {
    /// Reset any per-trial state before a fresh n-by-n grid is filled.
    fn begin_trial(&mut self, _n: usize) {}

    /// Return the next candidate site, or `None` if the sampler is exhausted.
    ///
    /// Candidates may repeat; the trial skips sites that are already open.
    fn next_site(&mut self, n: usize) -> Option<Site>;
}

impl<S: SiteSampler + ?Sized> SiteSampler for &mut S {
    fn begin_trial(&mut self, n: usize) {
        (**self).begin_trial(n);
    }

    fn next_site(&mut self, n: usize) -> Option<Site> {
        (**self).next_site(n)
    }
}

/// Draws `(row, col)` uniformly from `[1, n] x [1, n]` with replacement.
#[derive(Debug, Clone)]
pub struct UniformSampler<R> {
    rng: R,
}

impl<R: Rng> UniformSampler<R> {
    /// Wrap a random number generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Recover the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> SiteSampler for UniformSampler<R> {
    fn next_site(&mut self, n: usize) -> Option<Site> {
        if n == 0 {
            return None;
        }
        let row = self.rng.random_range(1..=n);
        let col = self.rng.random_range(1..=n);
        Some(Site::new(row, col))
    }
}

/// Visits every site exactly once per trial, in a shuffled order.
///
/// Each pick is uniform over the sites not yet drawn, so the sequence of
/// newly opened sites has the same distribution as with [`UniformSampler`]
/// without the wasted draws late in a trial.
#[derive(Debug, Clone)]
pub struct PermutationSampler<R> {
    rng: R,
    /// Remaining sites for the current trial, consumed from the back.
    pending: Vec<Site>,
}

impl<R: Rng> PermutationSampler<R> {
    /// Wrap a random number generator.
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            pending: Vec::new(),
        }
    }

    /// Sites left in the current trial's permutation.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl<R: Rng> SiteSampler for PermutationSampler<R> {
    fn begin_trial(&mut self, n: usize) {
        self.pending.clear();
        self.pending
            .extend((1..=n).flat_map(|row| (1..=n).map(move |col| Site::new(row, col))));
        self.pending.shuffle(&mut self.rng);
    }

    fn next_site(&mut self, _n: usize) -> Option<Site> {
        self.pending.pop()
    }
}

/// Replays a fixed sequence of sites, shared across trials.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSampler {
    sites: VecDeque<Site>,
}

impl ScriptedSampler {
    /// Build a sampler that yields `sites` in order.
    pub fn new<I, S>(sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Site>,
    {
        Self {
            sites: sites.into_iter().map(Into::into).collect(),
        }
    }

    /// Sites not yet handed out.
    pub fn remaining(&self) -> usize {
        self.sites.len()
    }
}

impl SiteSampler for ScriptedSampler {
    fn next_site(&mut self, _n: usize) -> Option<Site> {
        self.sites.pop_front()
    }
}
