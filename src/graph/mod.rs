pub mod cell;
pub mod chain;

pub use self::cell::CellRecord;
pub use self::chain::ChainGraph;

use crate::consts::MAX_NEIGHBORS;
use crate::core_types::CellId;
use crate::error::{PackForgeError, PfResult};
use std::collections::HashMap;
use tracing::debug;

/// Undirected adjacency model of the pack.
///
/// Cells are re-indexed densely in ascending id order, so everything derived
/// from the graph is independent of the order the records arrived in. All
/// other modules address cells by that dense index.
#[derive(Debug, Clone)]
pub struct CellGraph {
    ids: Vec<CellId>,
    index: HashMap<CellId, usize>,
    positions: Vec<(f64, f64)>,
    adjacency: Vec<Vec<usize>>,
    populated_slots: Vec<usize>,
    edge_count: usize,
}

impl CellGraph {
    pub fn from_records(records: &[CellRecord]) -> PfResult<Self> {
        if records.is_empty() {
            return Err(PackForgeError::MalformedInput(
                "cell collection is empty".into(),
            ));
        }

        let mut sorted: Vec<&CellRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.n);

        let mut ids = Vec::with_capacity(sorted.len());
        let mut index = HashMap::with_capacity(sorted.len());
        for (i, rec) in sorted.iter().enumerate() {
            if rec.n == 0 {
                return Err(PackForgeError::MalformedInput(
                    "cell id 0 is not allowed, ids start at 1".into(),
                ));
            }
            if index.insert(rec.n, i).is_some() {
                return Err(PackForgeError::MalformedInput(format!(
                    "cell {} appears more than once",
                    rec.n
                )));
            }
            ids.push(rec.n);
        }

        let n = ids.len();
        let mut adjacency = vec![Vec::with_capacity(MAX_NEIGHBORS); n];
        let mut populated_slots = Vec::with_capacity(n);
        let mut positions = Vec::with_capacity(n);

        for (i, rec) in sorted.iter().enumerate() {
            positions.push((rec.x, rec.y));
            populated_slots.push(rec.populated_slots());

            for neighbor in rec.slots().into_iter().flatten() {
                let j = *index.get(&neighbor).ok_or_else(|| {
                    PackForgeError::MalformedInput(format!(
                        "cell {} references nonexistent neighbor {}",
                        rec.n, neighbor
                    ))
                })?;
                if i == j {
                    return Err(PackForgeError::MalformedInput(format!(
                        "cell {} lists itself as a neighbor",
                        rec.n
                    )));
                }
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }

        let mut edge_count = 0;
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
            edge_count += list.len();
        }
        edge_count /= 2;

        debug!(cells = n, edges = edge_count, "Cell graph built");

        Ok(Self {
            ids,
            index,
            positions,
            adjacency,
            populated_slots,
            edge_count,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Cell ids in dense-index order (ascending).
    pub fn ids(&self) -> &[CellId] {
        &self.ids
    }

    #[inline(always)]
    pub fn id_of(&self, idx: usize) -> CellId {
        self.ids[idx]
    }

    pub fn index_of(&self, id: CellId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[inline(always)]
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    #[inline(always)]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].binary_search(&b).is_ok()
    }

    /// Distinct graph neighbors (a neighbor listed from both sides counts once).
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    #[inline(always)]
    pub fn position(&self, idx: usize) -> (f64, f64) {
        self.positions[idx]
    }

    /// A cell record with fewer than six populated slots is on the boundary.
    #[inline(always)]
    pub fn is_edge_cell(&self, idx: usize) -> bool {
        self.populated_slots[idx] < MAX_NEIGHBORS
    }

    pub fn edge_cells(&self) -> Vec<CellId> {
        (0..self.len())
            .filter(|&i| self.is_edge_cell(i))
            .map(|i| self.ids[i])
            .collect()
    }
}
