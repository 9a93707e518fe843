use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use packforge::config::{Config, ScoringWeights};
use packforge::error::PfResult;
use packforge::graph::CellGraph;
use packforge::loader;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/cells.json")]
    cells: String,

    /// JSON weights file; explicit --weight-* flags override it
    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Validate(cmd::validate::ValidateArgs),
    Render(cmd::render::RenderArgs),
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Replaces `config.weights` with the weights file, then reapplies every
/// weight flag the user typed.
fn resolve_weights(config: &mut Config, path: &str, sub_matches: &ArgMatches) -> PfResult<()> {
    info!("Loading Weights from: {}", path);
    let mut file_weights = ScoringWeights::load_from_file(path)?;
    file_weights.merge_from_cli(&config.weights, sub_matches);
    config.weights = file_weights;
    Ok(())
}

fn execute(cli: Cli, matches: &ArgMatches) -> PfResult<()> {
    info!("Loading Cells: {}", cli.cells);
    let cells = loader::load_cells(&cli.cells)?;

    match cli.command {
        Commands::Search(mut args) => {
            if let (Some(path), Some(sub)) = (&cli.weights, matches.subcommand_matches("search")) {
                resolve_weights(&mut args.config, path, sub)?;
            }
            let graph = Arc::new(CellGraph::from_records(&cells)?);
            cmd::search::run(args, graph)
        }
        Commands::Validate(mut args) => {
            if let (Some(path), Some(sub)) =
                (&cli.weights, matches.subcommand_matches("validate"))
            {
                resolve_weights(&mut args.config, path, sub)?;
            }
            let graph = Arc::new(CellGraph::from_records(&cells)?);
            cmd::validate::run(args, graph)
        }
        Commands::Render(args) => cmd::render::run(args, &cells),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);
    info!("Initializing PackForge...");

    if let Err(e) = execute(cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}
