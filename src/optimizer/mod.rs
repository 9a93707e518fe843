pub mod anneal;
pub mod mutation;
pub mod runner;

pub use self::anneal::{Replica, RunStats, SearchOutcome, SearchState, StepOutcome};
pub use self::runner::{
    NoProgress, OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback,
    ProgressReport, RunFailure, RunSummary,
};
