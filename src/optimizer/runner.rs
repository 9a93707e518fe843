use super::anneal::{Replica, RunStats, SearchOutcome};
use crate::config::{Config, SamplingMode};
use crate::constraints::ConstraintChecker;
use crate::error::{PackForgeError, PfResult};
use crate::partition::Partition;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub num_threads: usize,
    pub runs: usize,
    pub iterations: usize,
    pub initial_temp: f64,
    pub cooling_rate: f64,
    pub seed: u64,
    pub report_interval: usize,
    pub sampling: SamplingMode,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            num_threads: cfg.search.threads.unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            }),
            runs: cfg.search.runs,
            iterations: cfg.search.iterations,
            initial_temp: cfg.search.initial_temp,
            cooling_rate: cfg.search.cooling_rate,
            seed: cfg.search.seed,
            report_interval: cfg.search.report_interval,
            sampling: cfg.search.sampling,
        }
    }
}

/// Snapshot handed to a [`ProgressCallback`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    pub run: usize,
    pub iteration: usize,
    pub temperature: f64,
    pub current_score: f64,
    pub best_score: f64,
}

/// Receives progress from every run. Runs execute on pool threads, so
/// implementations see interleaved reports.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, report: &ProgressReport);

    fn on_run_finished(&self, _summary: &RunSummary) {}
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _report: &ProgressReport) {}
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run: usize,
    pub seed: u64,
    pub initial_score: f64,
    pub best_score: f64,
    pub stats: RunStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    pub run: usize,
    pub seed: u64,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub best: Partition,
    pub best_score: f64,
    pub best_run: usize,
    /// Completed runs, ordered by run index.
    pub runs: Vec<RunSummary>,
    pub failures: Vec<RunFailure>,
    pub elapsed: Duration,
}

impl OptimizationResult {
    pub fn completed(&self) -> usize {
        self.runs.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Multi-start driver: independent annealing runs from one seed partition,
/// reduced to the single best.
pub struct Optimizer {
    checker: Arc<ConstraintChecker>,
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(
        checker: Arc<ConstraintChecker>,
        scorer: Arc<Scorer>,
        options: OptimizationOptions,
    ) -> Self {
        Self {
            checker,
            scorer,
            options,
        }
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        initial: &Partition,
        callback: &CB,
    ) -> PfResult<OptimizationResult> {
        let opts = &self.options;
        if opts.runs == 0 {
            return Err(PackForgeError::Config("at least one run is required".into()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.num_threads.max(1))
            .build()
            .map_err(|e| PackForgeError::Config(format!("cannot build thread pool: {}", e)))?;

        info!(
            runs = opts.runs,
            threads = opts.num_threads,
            iterations = opts.iterations,
            "Starting annealing runs"
        );
        let start = Instant::now();

        let results: Vec<Result<SearchOutcome, RunFailure>> = pool.install(|| {
            (0..opts.runs)
                .into_par_iter()
                .map(|i| {
                    let seed = opts.seed.wrapping_add(i as u64);
                    let attempt =
                        panic::catch_unwind(AssertUnwindSafe(|| self.run_one(initial, i, seed, callback)));

                    let reason = match attempt {
                        Ok(Ok(outcome)) => return Ok(outcome),
                        Ok(Err(e)) => e.to_string(),
                        Err(payload) => panic_message(payload.as_ref()),
                    };
                    warn!(run = i, seed, reason = %reason, "Run failed");
                    Err(RunFailure {
                        run: i,
                        seed,
                        reason,
                    })
                })
                .collect()
        });

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        for r in results {
            match r {
                Ok(o) => outcomes.push(o),
                Err(f) => failures.push(f),
            }
        }

        // Highest score wins; runs arrive in index order, so a strict
        // comparison keeps the lowest index on ties.
        let mut best: Option<&SearchOutcome> = None;
        for o in &outcomes {
            if best.map_or(true, |b| o.best_score > b.best_score) {
                best = Some(o);
            }
        }
        let Some(best) = best else {
            return Err(PackForgeError::SearchFailed {
                completed: 0,
                failed: failures.len(),
            });
        };

        let elapsed = start.elapsed();
        info!(
            best_score = best.best_score,
            best_run = best.run,
            completed = outcomes.len(),
            failed = failures.len(),
            elapsed_secs = elapsed.as_secs_f64(),
            "Annealing finished"
        );

        Ok(OptimizationResult {
            best: best.best.clone(),
            best_score: best.best_score,
            best_run: best.run,
            runs: outcomes.iter().map(summarize).collect(),
            failures,
            elapsed,
        })
    }

    fn run_one<CB: ProgressCallback>(
        &self,
        initial: &Partition,
        run: usize,
        seed: u64,
        callback: &CB,
    ) -> PfResult<SearchOutcome> {
        let opts = &self.options;
        let mut replica = Replica::new(
            self.checker.clone(),
            self.scorer.clone(),
            initial.clone(),
            opts,
            run,
            seed,
        )?;
        replica.evolve(opts.iterations, opts.report_interval, callback)?;

        let outcome = replica.into_outcome();
        callback.on_run_finished(&summarize(&outcome));
        Ok(outcome)
    }
}

fn summarize(o: &SearchOutcome) -> RunSummary {
    RunSummary {
        run: o.run,
        seed: o.seed,
        initial_score: o.initial_score,
        best_score: o.best_score,
        stats: o.stats.clone(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}
