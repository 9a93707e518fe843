use crate::core_types::Assignment;
use crate::error::{PackForgeError, PfResult};
use crate::graph::{CellGraph, CellRecord};
use crate::scorer::ScoreDetails;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads the cell collection: a JSON array of `{n, x, y, "0".."5"}`.
pub fn load_cells<P: AsRef<Path>>(path: P) -> PfResult<Vec<CellRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        PackForgeError::MalformedInput(format!("cannot read cells '{}': {}", path.display(), e))
    })?;
    let cells: Vec<CellRecord> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), cells = cells.len(), "Loaded cell records");
    Ok(cells)
}

/// Reads the cells and builds the graph in one go.
pub fn load_graph<P: AsRef<Path>>(path: P) -> PfResult<CellGraph> {
    CellGraph::from_records(&load_cells(path)?)
}

/// Reads a `{"cell": "group"}` object. Numeric values are accepted too.
pub fn load_assignment<P: AsRef<Path>>(path: P) -> PfResult<Assignment> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        PackForgeError::MalformedInput(format!(
            "cannot read assignment '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_assignment(&content)
}

pub fn parse_assignment(content: &str) -> PfResult<Assignment> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
    raw.into_iter()
        .map(|(cell, group)| {
            let group = match group {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(PackForgeError::MalformedInput(format!(
                        "cell {} has non-scalar group {}",
                        cell, other
                    )))
                }
            };
            Ok((cell, group))
        })
        .collect()
}

pub fn save_assignment<P: AsRef<Path>>(path: P, assignment: &Assignment) -> PfResult<()> {
    write_json(path.as_ref(), assignment)
}

pub fn save_details<P: AsRef<Path>>(path: P, details: &ScoreDetails) -> PfResult<()> {
    write_json(path.as_ref(), details)
}

/// Sidecar path for the score details of `assignment_path`:
/// `best.json` becomes `best.score.json`.
pub fn details_path<P: AsRef<Path>>(assignment_path: P) -> PathBuf {
    let path = assignment_path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "solution".to_string());
    path.with_file_name(format!("{}.score.json", stem))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> PfResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "Saved");
    Ok(())
}
