use crate::reports;
use clap::Args;
use packforge::config::Config;
use packforge::constraints::ConstraintChecker;
use packforge::error::{PackForgeError, PfResult};
use packforge::graph::CellGraph;
use packforge::loader;
use packforge::partition::Partition;
use packforge::scorer::Scorer;
use packforge::verifier::{self, Verifier};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Assignment to check
    #[arg(default_value = "best_solution.json")]
    pub solution: String,

    /// Score the solution is claimed to reach
    #[arg(long)]
    pub claimed: Option<f64>,

    #[arg(long, default_value_t = 1e-6)]
    pub tolerance: f64,

    /// Write per-group metrics to this CSV file
    #[arg(long)]
    pub export: Option<String>,
}

pub fn run(args: ValidateArgs, graph: Arc<CellGraph>) -> PfResult<()> {
    let config = &args.config;
    let checker = Arc::new(ConstraintChecker::new(graph.clone(), &config.layout)?);
    let scorer = Arc::new(Scorer::new(
        graph.clone(),
        config.layout.group_count,
        config.weights.clone(),
    ));
    let verifier = Verifier::new(checker, scorer);

    let assignment = loader::load_assignment(&args.solution)?;
    let partition = Partition::from_assignment(&assignment, &graph, config.layout.group_count)?;

    info!(path = %args.solution, "Checking solution");
    let report = verifier.verify(&partition)?;

    let details = match (&report.violation, report.details) {
        (Some(v), _) => {
            println!("Error: {}", v);
            return Err(PackForgeError::Validation(v.to_string()));
        }
        (None, Some(details)) => details,
        (None, None) => {
            return Err(PackForgeError::Validation(
                "valid solution produced no score".into(),
            ))
        }
    };

    let groups: Vec<String> = (1..=config.layout.group_count).map(|g| g.to_string()).collect();
    println!("Checking Groups: {} are valid", groups.join(", "));

    let rows = verifier.group_metrics(&partition, &details);
    reports::print_group_report(&rows);
    reports::print_score_report(&details, &config.weights);

    if let Some(path) = &args.export {
        verifier::export_group_metrics(path, &rows)?;
    }

    if let Some(claimed) = args.claimed {
        verifier.check_claimed(&details, claimed, args.tolerance)?;
    }
    Ok(())
}
