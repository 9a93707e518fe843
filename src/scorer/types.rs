use serde::{Deserialize, Serialize};

/// Every term of the objective for one partition, plus the per-group and
/// per-link breakdown the validator prints.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    // Top-line Score
    pub combined: f64,

    // The six terms, unweighted
    pub total_surface_area: usize,
    /// Negative sample std-dev of the link surface areas.
    pub interconnection_balance: f64,
    pub edge_cooling: usize,
    pub spread: f64,
    pub current_path_length: f64,
    /// Sample std-dev of the group stresses (lower is better).
    pub degradation_balance: f64,

    // Breakdown
    pub surface_areas: Vec<usize>,
    pub stresses: Vec<usize>,
    pub group_spreads: Vec<f64>,
    pub centroids: Vec<(f64, f64)>,
}

impl ScoreDetails {
    pub fn min_surface_area(&self) -> usize {
        self.surface_areas.iter().copied().min().unwrap_or(0)
    }

    pub fn max_surface_area(&self) -> usize {
        self.surface_areas.iter().copied().max().unwrap_or(0)
    }

    /// Sample std-dev of the link surface areas.
    pub fn surface_area_std_dev(&self) -> f64 {
        self.interconnection_balance.abs()
    }
}
