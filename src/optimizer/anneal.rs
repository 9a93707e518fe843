use super::mutation::{apply_swap, MoveGenerator};
use super::runner::{OptimizationOptions, ProgressCallback, ProgressReport};
use crate::constraints::ConstraintChecker;
use crate::error::{PackForgeError, PfResult};
use crate::partition::Partition;
use crate::scorer::Scorer;
use std::sync::Arc;
use tracing::debug;

/// What a single annealing iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The proposal touched a frozen group and was dropped unseen.
    PinnedSkip,
    /// The swapped partition broke a constraint.
    Invalid,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub iterations: usize,
    pub pinned_skips: usize,
    pub invalid: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub improvements: usize,
    pub final_temperature: f64,
}

impl RunStats {
    fn record(&mut self, outcome: StepOutcome) {
        self.iterations += 1;
        match outcome {
            StepOutcome::PinnedSkip => self.pinned_skips += 1,
            StepOutcome::Invalid => self.invalid += 1,
            StepOutcome::Accepted => self.accepted += 1,
            StepOutcome::Rejected => self.rejected += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub current: Partition,
    pub current_score: f64,
    pub best: Partition,
    pub best_score: f64,
    pub temperature: f64,
}

/// Finished run: the best partition it saw and how it got there.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub run: usize,
    pub seed: u64,
    pub initial_score: f64,
    pub best: Partition,
    pub best_score: f64,
    pub stats: RunStats,
}

/// One independent simulated-annealing chain.
///
/// Owns its state and generator outright; the checker and scorer are
/// shared read-only with every other replica.
pub struct Replica {
    pub checker: Arc<ConstraintChecker>,
    pub scorer: Arc<Scorer>,
    pub moves: MoveGenerator,
    pub state: SearchState,
    pub stats: RunStats,
    pub rng: fastrand::Rng,
    pub cooling_rate: f64,
    pub run: usize,
    pub seed: u64,
    initial_score: f64,
}

impl Replica {
    pub fn new(
        checker: Arc<ConstraintChecker>,
        scorer: Arc<Scorer>,
        initial: Partition,
        opts: &OptimizationOptions,
        run: usize,
        seed: u64,
    ) -> PfResult<Self> {
        checker.check_solution(&initial).map_err(|v| {
            PackForgeError::Validation(format!("seed partition is invalid: {}", v))
        })?;

        let moves = MoveGenerator::new(opts.sampling, &checker, &initial);
        let score = scorer.score(&initial)?;

        Ok(Self {
            checker,
            scorer,
            moves,
            state: SearchState {
                best: initial.clone(),
                current: initial,
                current_score: score,
                best_score: score,
                temperature: opts.initial_temp,
            },
            stats: RunStats {
                final_temperature: opts.initial_temp,
                ..RunStats::default()
            },
            rng: fastrand::Rng::with_seed(seed),
            cooling_rate: opts.cooling_rate,
            run,
            seed,
            initial_score: score,
        })
    }

    /// Runs one iteration: propose, filter, Metropolis decision, cool.
    ///
    /// Dropped proposals (frozen group or broken constraint) still use up
    /// the iteration but leave the temperature untouched.
    pub fn step(&mut self) -> PfResult<StepOutcome> {
        let outcome = self.try_step()?;
        self.stats.record(outcome);
        Ok(outcome)
    }

    fn try_step(&mut self) -> PfResult<StepOutcome> {
        let Some((a, b)) = self.moves.propose_move(&mut self.rng) else {
            return Ok(StepOutcome::PinnedSkip);
        };

        let current = &self.state.current;
        if self.checker.is_frozen(current.group_of(a)) || self.checker.is_frozen(current.group_of(b)) {
            return Ok(StepOutcome::PinnedSkip);
        }

        let candidate = apply_swap(current, a, b);
        if !self.checker.is_valid_solution(&candidate) {
            return Ok(StepOutcome::Invalid);
        }

        let candidate_score = self.scorer.score(&candidate)?;
        let delta = candidate_score - self.state.current_score;

        // Metropolis Criterion
        let accepted =
            delta > 0.0 || self.rng.f64() < (delta / self.state.temperature).exp();

        if accepted {
            self.state.current = candidate;
            self.state.current_score = candidate_score;

            if candidate_score > self.state.best_score {
                self.state.best = self.state.current.clone();
                self.state.best_score = candidate_score;
                self.stats.improvements += 1;
                debug!(run = self.run, score = candidate_score, "New best score found");
            }
        }

        self.state.temperature *= self.cooling_rate;
        self.stats.final_temperature = self.state.temperature;

        Ok(if accepted {
            StepOutcome::Accepted
        } else {
            StepOutcome::Rejected
        })
    }

    /// Runs `iterations` steps, reporting every `report_interval` iterations.
    pub fn evolve<CB: ProgressCallback>(
        &mut self,
        iterations: usize,
        report_interval: usize,
        callback: &CB,
    ) -> PfResult<()> {
        for i in 0..iterations {
            self.step()?;

            if report_interval > 0 && i % report_interval == 0 {
                let report = ProgressReport {
                    run: self.run,
                    iteration: i,
                    temperature: self.state.temperature,
                    current_score: self.state.current_score,
                    best_score: self.state.best_score,
                };
                debug!(
                    run = report.run,
                    iteration = report.iteration,
                    temperature = report.temperature,
                    current = report.current_score,
                    best = report.best_score,
                    "Annealing progress"
                );
                callback.on_progress(&report);
            }
        }
        Ok(())
    }

    pub fn into_outcome(self) -> SearchOutcome {
        SearchOutcome {
            run: self.run,
            seed: self.seed,
            initial_score: self.initial_score,
            best: self.state.best,
            best_score: self.state.best_score,
            stats: self.stats,
        }
    }
}
