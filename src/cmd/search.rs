use crate::reports;
use clap::Args;
use packforge::config::Config;
use packforge::constraints::ConstraintChecker;
use packforge::error::{PackForgeError, PfResult};
use packforge::graph::CellGraph;
use packforge::loader;
use packforge::optimizer::{OptimizationOptions, Optimizer, ProgressCallback, ProgressReport, RunSummary};
use packforge::partition::Partition;
use packforge::scorer::Scorer;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// Seed assignment every run starts from
    #[arg(short, long, default_value = "data/initial_solution.json")]
    pub initial: String,

    /// Where to write the best assignment
    #[arg(short, long, default_value = "best_solution.json")]
    pub output: String,

    /// Persist the best result even if some runs failed
    #[arg(long, default_value_t = false)]
    pub allow_partial: bool,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, report: &ProgressReport) {
        info!(
            run = report.run,
            iteration = report.iteration,
            temperature = report.temperature,
            current = report.current_score,
            best = report.best_score,
            "progress"
        );
    }

    fn on_run_finished(&self, summary: &RunSummary) {
        info!(
            run = summary.run,
            best = summary.best_score,
            accepted = summary.stats.accepted,
            "Run finished"
        );
    }
}

pub fn run(args: SearchArgs, graph: Arc<CellGraph>) -> PfResult<()> {
    let config = &args.config;
    config.search.validate()?;

    let checker = Arc::new(ConstraintChecker::new(graph.clone(), &config.layout)?);
    let scorer = Arc::new(Scorer::new(
        graph.clone(),
        config.layout.group_count,
        config.weights.clone(),
    ));

    let assignment = loader::load_assignment(&args.initial)?;
    let initial = Partition::from_assignment(&assignment, &graph, config.layout.group_count)?;
    if let Err(v) = checker.check_solution(&initial) {
        return Err(PackForgeError::Validation(format!(
            "initial solution '{}' is invalid: {}",
            args.initial, v
        )));
    }
    info!(score = scorer.score(&initial)?, "Initial solution is valid");

    let optimizer = Optimizer::new(checker, scorer.clone(), OptimizationOptions::from(config));
    let result = optimizer.run(&initial, &LogProgress)?;

    reports::print_run_report(&result.runs, &result.failures, result.best_run);
    info!(
        "Total runtime: {:.2} seconds",
        result.elapsed.as_secs_f64()
    );

    if !result.is_complete() {
        warn!(
            completed = result.completed(),
            failed = result.failures.len(),
            "Some runs failed"
        );
        if !args.allow_partial {
            return Err(PackForgeError::SearchFailed {
                completed: result.completed(),
                failed: result.failures.len(),
            });
        }
    }

    let details = scorer.score_details(&result.best)?;
    reports::print_score_report(&details, &config.weights);

    loader::save_assignment(&args.output, &result.best.to_assignment(&graph))?;
    loader::save_details(loader::details_path(&args.output), &details)?;
    info!(
        score = result.best_score,
        run = result.best_run,
        path = %args.output,
        "Best solution saved"
    );
    Ok(())
}
