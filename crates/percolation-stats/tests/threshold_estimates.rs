//! End-to-end tests for [`PercolationStats`] batches.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use percolation_stats::{
    PercolationStats, SamplingStrategy, StatsConfig, StatsError,
};

fn seeded(n: usize, trials: usize, seed: u64, sampling: SamplingStrategy) -> StatsConfig {
    StatsConfig {
        seed: Some(seed),
        sampling,
        ..StatsConfig::new(n, trials)
    }
}

#[test]
fn small_grid_statistics_are_sane() {
    let stats = PercolationStats::new(2, 100).unwrap();
    assert_eq!(stats.trials(), 100);
    assert_eq!(stats.grid_size(), 2);
    assert!(stats.mean() > 0.0 && stats.mean() < 1.0);
    assert!(stats.stddev() >= 0.0);
    assert!(stats.confidence_lo() <= stats.mean());
    assert!(stats.mean() <= stats.confidence_hi());
    assert!(stats.seed().is_some());
}

#[test]
fn two_by_two_thresholds_are_half_or_three_quarters() {
    let stats = PercolationStats::with_seed(2, 200, 3).unwrap();
    for &threshold in stats.thresholds() {
        assert!(
            (threshold - 0.5).abs() < 1e-12 || (threshold - 0.75).abs() < 1e-12,
            "unexpected threshold {threshold}"
        );
    }
}

#[test]
fn same_seed_reproduces_results() {
    let a = PercolationStats::with_seed(10, 40, 2024).unwrap();
    let b = PercolationStats::with_seed(10, 40, 2024).unwrap();
    assert_eq!(a.thresholds(), b.thresholds());
    assert!((a.mean() - b.mean()).abs() < 1e-15);
    assert!((a.stddev() - b.stddev()).abs() < 1e-15);
}

#[test]
fn different_seeds_diverge() {
    let a = PercolationStats::with_seed(10, 40, 1).unwrap();
    let b = PercolationStats::with_seed(10, 40, 2).unwrap();
    assert_ne!(a.thresholds(), b.thresholds());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_run_matches_sequential_run() {
    for sampling in [SamplingStrategy::WithReplacement, SamplingStrategy::Permutation] {
        let sequential = seeded(12, 64, 99, sampling);
        let parallel = StatsConfig {
            parallel: true,
            ..sequential.clone()
        };
        let a = PercolationStats::from_config(&sequential).unwrap();
        let b = PercolationStats::from_config(&parallel).unwrap();
        assert_eq!(a.thresholds(), b.thresholds());
        assert_eq!(a.summary(), b.summary());
    }
}

#[test]
fn both_strategies_estimate_the_known_threshold() {
    for sampling in [SamplingStrategy::WithReplacement, SamplingStrategy::Permutation] {
        let stats = PercolationStats::from_config(&seeded(20, 200, 17, sampling)).unwrap();
        assert!(
            stats.mean() > 0.5 && stats.mean() < 0.7,
            "{sampling:?} mean {}",
            stats.mean()
        );
        assert!(stats.confidence_hi() - stats.confidence_lo() < 0.05);
    }
}

#[test]
fn single_site_grid_always_needs_one_site() {
    let stats = PercolationStats::with_seed(1, 5, 0).unwrap();
    assert!((stats.mean() - 1.0).abs() < f64::EPSILON);
    assert!(stats.stddev().abs() < f64::EPSILON);
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let err = PercolationStats::from_config(&StatsConfig::new(0, 0)).unwrap_err();
    assert!(matches!(err, StatsError::InvalidGridSize { n: 0 }));
    assert!(err.is_invalid_argument());
}

#[test]
fn summary_serializes_to_json() {
    let stats = PercolationStats::with_seed(4, 10, 5).unwrap();
    let json = serde_json::to_value(stats.summary()).unwrap();
    assert_eq!(json["grid_size"], 4);
    assert_eq!(json["trials"], 10);
    assert_eq!(json["seed"], 5);
    assert!(json["mean"].is_f64());
    assert!(json["confidence_lo"].is_f64());
}
