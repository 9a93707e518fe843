use crate::core_types::GroupId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed Input: {0}")]
    MalformedInput(String),

    /// Scoring was asked to measure a group that is empty or not connected.
    /// Callers are expected to validate first, so this is an internal bug.
    #[error("Group {group} is not a connected group")]
    DisconnectedGroup { group: GroupId },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Search failed: {completed} runs completed, {failed} runs failed")]
    SearchFailed { completed: usize, failed: usize },
}

pub type PfResult<T> = Result<T, PackForgeError>;
