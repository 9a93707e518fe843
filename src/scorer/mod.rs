pub mod metrics;
pub mod types;

pub use self::types::ScoreDetails;
use crate::config::ScoringWeights;
use crate::core_types::GroupId;
use crate::error::{PackForgeError, PfResult};
use crate::graph::{CellGraph, ChainGraph};
use crate::partition::Partition;
use std::sync::Arc;

/// The multi-term objective. Higher is better.
///
/// Scores are always recomputed from scratch; callers must validate a
/// partition before scoring it, otherwise spread and centroid computation
/// report `DisconnectedGroup`.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub graph: Arc<CellGraph>,
    pub chain: ChainGraph,
    pub weights: ScoringWeights,
}

impl Scorer {
    pub fn new(graph: Arc<CellGraph>, group_count: usize, weights: ScoringWeights) -> Self {
        Self {
            graph,
            chain: ChainGraph::new(group_count),
            weights,
        }
    }

    /// Combined objective used by the search loop.
    pub fn score(&self, partition: &Partition) -> PfResult<f64> {
        Ok(self.score_details(partition)?.combined)
    }

    /// All six terms, their per-group breakdown, and the combined value.
    pub fn score_details(&self, partition: &Partition) -> PfResult<ScoreDetails> {
        let graph = &*self.graph;
        if partition.group_count() != self.chain.group_count() || partition.len() != graph.len() {
            return Err(PackForgeError::Validation(format!(
                "partition of {} cells into {} groups does not fit a {}-cell, {}-group scorer",
                partition.len(),
                partition.group_count(),
                graph.len(),
                self.chain.group_count()
            )));
        }
        let groups = partition.decode();

        // 1. Chain surfaces
        let surface_areas = metrics::surface_areas(graph, partition, &self.chain);
        let total_surface_area: usize = surface_areas.iter().sum();
        let surface_f: Vec<f64> = surface_areas.iter().map(|&a| a as f64).collect();
        let interconnection_balance = -metrics::sample_std_dev(&surface_f);

        // 2. Cooling
        let edge_cooling = metrics::edge_cooling(graph, &groups);

        // 3. Compactness & centroids
        let mut group_spreads = Vec::with_capacity(groups.len());
        let mut centroids = Vec::with_capacity(groups.len());
        for (i, members) in groups.iter().enumerate() {
            let group = (i + 1) as GroupId;
            group_spreads.push(metrics::group_spread(graph, members, group)?);
            centroids.push(metrics::centroid(graph, members, group)?);
        }
        let spread: f64 = group_spreads.iter().sum();
        let current_path_length = metrics::current_path_length(&centroids, &self.chain);

        // 4. Stress balance
        let stresses = metrics::stresses(&surface_areas, &self.chain);
        let stress_f: Vec<f64> = stresses.iter().map(|&s| s as f64).collect();
        let degradation_balance = metrics::sample_std_dev(&stress_f);

        let w = &self.weights;
        let combined = w.weight_surface_area * total_surface_area as f64
            + w.weight_interconnection * interconnection_balance
            + w.weight_edge_cooling * edge_cooling as f64
            - w.weight_spread * spread
            - w.weight_current_path * current_path_length
            - w.weight_degradation * degradation_balance;

        Ok(ScoreDetails {
            combined,
            total_surface_area,
            interconnection_balance,
            edge_cooling,
            spread,
            current_path_length,
            degradation_balance,
            surface_areas,
            stresses,
            group_spreads,
            centroids,
        })
    }
}
