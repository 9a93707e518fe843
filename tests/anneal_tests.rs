mod common;

use common::{pack_140, pack_20, Pack140};
use packforge::config::{Config, SamplingMode, ScoringWeights};
use packforge::constraints::ConstraintChecker;
use packforge::error::PackForgeError;
use packforge::optimizer::{NoProgress, OptimizationOptions, Replica, StepOutcome};
use packforge::scorer::Scorer;
use std::sync::Arc;

fn options(iterations: usize, sampling: SamplingMode) -> OptimizationOptions {
    let mut config = Config::default();
    config.search.iterations = iterations;
    config.search.sampling = sampling;
    config.search.threads = Some(2);
    config.search.runs = 1;
    OptimizationOptions::from(&config)
}

fn replica(pack: &Pack140, opts: &OptimizationOptions, seed: u64) -> Replica {
    let checker = Arc::new(ConstraintChecker::new(pack.graph.clone(), &pack.layout).unwrap());
    let scorer = Arc::new(Scorer::new(pack.graph.clone(), 10, ScoringWeights::default()));
    Replica::new(checker, scorer, pack.seed.clone(), opts, 0, seed).unwrap()
}

#[test]
fn test_same_seed_same_trajectory() {
    let pack = pack_140();
    let opts = options(2_000, SamplingMode::AllCells);
    let mut a = replica(&pack, &opts, 42);
    let mut b = replica(&pack, &opts, 42);

    let trace_a: Vec<StepOutcome> = (0..2_000).map(|_| a.step().unwrap()).collect();
    let trace_b: Vec<StepOutcome> = (0..2_000).map(|_| b.step().unwrap()).collect();

    assert_eq!(trace_a, trace_b);
    assert_eq!(a.state.best, b.state.best);
    assert_eq!(a.state.best_score, b.state.best_score);
    assert_eq!(a.state.temperature, b.state.temperature);
}

#[test]
fn test_best_never_below_seed() {
    let pack = pack_140();
    let opts = options(1_000, SamplingMode::AllCells);
    let mut r = replica(&pack, &opts, 7);
    let seed_score = r.state.best_score;

    r.evolve(1_000, 0, &NoProgress).unwrap();
    let outcome = r.into_outcome();

    assert_eq!(outcome.initial_score, seed_score);
    assert!(outcome.best_score >= seed_score);
    assert_eq!(outcome.stats.iterations, 1_000);
}

#[test]
fn test_pinned_groups_never_change() {
    let pack = pack_140();
    let opts = options(3_000, SamplingMode::AllCells);
    let mut r = replica(&pack, &opts, 3);
    let checker = r.checker.clone();

    let group_1 = pack.seed.members(1);
    let group_10 = pack.seed.members(10);
    for _ in 0..3_000 {
        r.step().unwrap();
        assert_eq!(r.state.current.members(1), group_1);
        assert_eq!(r.state.current.members(10), group_10);
        assert!(checker.is_valid_solution(&r.state.current));
    }
    assert!(r.stats.pinned_skips > 0);
    assert_eq!(r.state.best.members(1), group_1);
}

#[test]
fn test_current_score_tracks_current_partition() {
    let pack = pack_140();
    let opts = options(500, SamplingMode::MutableOnly);
    let mut r = replica(&pack, &opts, 5);
    r.evolve(500, 0, &NoProgress).unwrap();

    let score = r.scorer.score(&r.state.current).unwrap();
    assert_eq!(score, r.state.current_score);
    let best = r.scorer.score(&r.state.best).unwrap();
    assert_eq!(best, r.state.best_score);
}

#[test]
fn test_only_decisions_cool() {
    let pack = pack_140();
    let opts = options(2_000, SamplingMode::AllCells);
    let mut r = replica(&pack, &opts, 9);
    r.evolve(2_000, 0, &NoProgress).unwrap();

    let s = &r.stats;
    assert_eq!(
        s.iterations,
        s.pinned_skips + s.invalid + s.accepted + s.rejected
    );
    let decisions = (s.accepted + s.rejected) as i32;
    let expected = opts.initial_temp * opts.cooling_rate.powi(decisions);
    assert!((s.final_temperature - expected).abs() < 1e-9 * opts.initial_temp);
    assert_eq!(s.final_temperature, r.state.temperature);
}

#[test]
fn test_mutable_only_never_skips() {
    let pack = pack_140();
    let opts = options(1_000, SamplingMode::MutableOnly);
    let mut r = replica(&pack, &opts, 1);
    assert_eq!(r.moves.pool_size(), 112);
    r.evolve(1_000, 0, &NoProgress).unwrap();
    assert_eq!(r.stats.pinned_skips, 0);
}

#[test]
fn test_invalid_seed_is_rejected() {
    let pack = pack_20();
    let checker = Arc::new(ConstraintChecker::new(pack.graph.clone(), &pack.layout).unwrap());
    let scorer = Arc::new(Scorer::new(pack.graph.clone(), 2, ScoringWeights::default()));
    let split = pack.seed.swapped(4, 19);
    let opts = options(10, SamplingMode::AllCells);

    assert!(matches!(
        Replica::new(checker, scorer, split, &opts, 0, 1),
        Err(PackForgeError::Validation(_))
    ));
}
