use crate::constraints::{ConstraintChecker, Violation};
use crate::error::{PackForgeError, PfResult};
use crate::graph::CellGraph;
use crate::partition::Partition;
use crate::scorer::{ScoreDetails, Scorer};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of re-checking a finished partition.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// First violation found, if any.
    pub violation: Option<Violation>,
    /// Only computed for valid partitions.
    pub details: Option<ScoreDetails>,
    pub group_sizes: Vec<usize>,
}

impl VerificationReport {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// Per-group row of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub group: usize,
    pub cells: String,
    pub edge_cells: usize,
    pub spread: f64,
    pub stress: usize,
    /// Surface shared with the next group; 0 for the last one.
    pub surface_to_next: usize,
    pub centroid_x: f64,
    pub centroid_y: f64,
}

pub struct Verifier {
    checker: Arc<ConstraintChecker>,
    scorer: Arc<Scorer>,
}

impl Verifier {
    pub fn new(checker: Arc<ConstraintChecker>, scorer: Arc<Scorer>) -> Self {
        Self { checker, scorer }
    }

    pub fn graph(&self) -> &CellGraph {
        self.checker.graph()
    }

    pub fn verify(&self, partition: &Partition) -> PfResult<VerificationReport> {
        let group_sizes = partition.decode().iter().map(Vec::len).collect();
        match self.checker.check_solution(partition) {
            Err(v) => {
                warn!(violation = %v, "Partition is invalid");
                Ok(VerificationReport {
                    violation: Some(v),
                    details: None,
                    group_sizes,
                })
            }
            Ok(()) => {
                let details = self.scorer.score_details(partition)?;
                info!(score = details.combined, "Partition is valid");
                Ok(VerificationReport {
                    violation: None,
                    details: Some(details),
                    group_sizes,
                })
            }
        }
    }

    /// Compares a recomputed score against `claimed`. A difference above
    /// `tolerance` is a `Validation` error.
    pub fn check_claimed(&self, details: &ScoreDetails, claimed: f64, tolerance: f64) -> PfResult<()> {
        let diff = (details.combined - claimed).abs();
        if diff > tolerance {
            warn!(
                "Score verification mismatch. Claimed: {:.4}, Calculated: {:.4}, Diff: {:.4}",
                claimed, details.combined, diff
            );
            return Err(PackForgeError::Validation(format!(
                "claimed score {} differs from recomputed {} by {}",
                claimed, details.combined, diff
            )));
        }
        info!("Verification Passed. Diff: {:.6}", diff);
        Ok(())
    }

    pub fn group_metrics(&self, partition: &Partition, details: &ScoreDetails) -> Vec<GroupMetrics> {
        let graph = self.graph();
        partition
            .decode()
            .iter()
            .enumerate()
            .map(|(i, members)| {
                let ids: Vec<String> = members.iter().map(|&m| graph.id_of(m).to_string()).collect();
                let (cx, cy) = details.centroids.get(i).copied().unwrap_or((0.0, 0.0));
                GroupMetrics {
                    group: i + 1,
                    cells: ids.join(" "),
                    edge_cells: members.iter().filter(|&&m| graph.is_edge_cell(m)).count(),
                    spread: details.group_spreads.get(i).copied().unwrap_or(0.0),
                    stress: details.stresses.get(i).copied().unwrap_or(0),
                    surface_to_next: details.surface_areas.get(i).copied().unwrap_or(0),
                    centroid_x: cx,
                    centroid_y: cy,
                }
            })
            .collect()
    }
}

pub fn export_group_metrics<P: AsRef<Path>>(path: P, rows: &[GroupMetrics]) -> PfResult<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!(path = %path.as_ref().display(), rows = rows.len(), "Exported group metrics");
    Ok(())
}
