use crate::config::PackLayout;
use crate::core_types::{CellId, GroupId};
use crate::error::{PackForgeError, PfResult};
use crate::graph::CellGraph;
use crate::partition::Partition;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// A hard membership rule attached to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinRule {
    /// The group holds exactly these cells.
    Exact(Vec<CellId>),
    /// The group holds at least these cells.
    Contains(Vec<CellId>),
    /// The group holds none of these cells.
    Excludes(Vec<CellId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedGroup {
    pub group: GroupId,
    pub rule: PinRule,
}

/// First reason a partition was found invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Partition covers {found} cells, graph has {expected}")]
    CellCount { expected: usize, found: usize },
    #[error("Group {group} has {size} cells, expected {expected}")]
    GroupSize {
        group: GroupId,
        size: usize,
        expected: usize,
    },
    #[error("Group {group} is not connected")]
    Disconnected { group: GroupId },
    #[error("Group {group} does not match its fixed cell set")]
    PinnedMismatch { group: GroupId },
    #[error("Group {group} does not include cell {cell}")]
    MissingRequired { group: GroupId, cell: CellId },
    #[error("Group {group} includes forbidden cell {cell}")]
    ForbiddenPresent { group: GroupId, cell: CellId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinKind {
    Exact,
    Contains,
    Excludes,
}

#[derive(Debug, Clone)]
struct ResolvedPin {
    group: GroupId,
    kind: PinKind,
    // Dense indices, ascending.
    cells: Vec<usize>,
}

/// Checks group sizes, group connectivity and pinned memberships.
///
/// Groups carrying any pin rule are frozen: the search never swaps their cells.
#[derive(Debug, Clone)]
pub struct ConstraintChecker {
    graph: Arc<CellGraph>,
    group_count: usize,
    group_size: usize,
    pins: Vec<ResolvedPin>,
    frozen: Vec<bool>,
}

impl ConstraintChecker {
    pub fn new(graph: Arc<CellGraph>, layout: &PackLayout) -> PfResult<Self> {
        layout.validate()?;
        if layout.total_cells() != graph.len() {
            return Err(PackForgeError::Config(format!(
                "{} groups of {} cells need {} cells, the pack has {}",
                layout.group_count,
                layout.group_size,
                layout.total_cells(),
                graph.len()
            )));
        }

        let mut frozen = vec![false; layout.group_count + 1];
        let mut pins = Vec::new();
        for pin in layout.pinned_groups()? {
            let (kind, ids) = match &pin.rule {
                PinRule::Exact(ids) => (PinKind::Exact, ids),
                PinRule::Contains(ids) => (PinKind::Contains, ids),
                PinRule::Excludes(ids) => (PinKind::Excludes, ids),
            };
            let mut cells = ids
                .iter()
                .map(|&id| {
                    graph.index_of(id).ok_or_else(|| {
                        PackForgeError::Config(format!(
                            "group {} is pinned to cell {}, which does not exist",
                            pin.group, id
                        ))
                    })
                })
                .collect::<PfResult<Vec<usize>>>()?;
            cells.sort_unstable();

            frozen[pin.group as usize] = true;
            pins.push(ResolvedPin {
                group: pin.group,
                kind,
                cells,
            });
        }

        Ok(Self {
            graph,
            group_count: layout.group_count,
            group_size: layout.group_size,
            pins,
            frozen,
        })
    }

    pub fn graph(&self) -> &Arc<CellGraph> {
        &self.graph
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    #[inline(always)]
    pub fn is_frozen(&self, group: GroupId) -> bool {
        self.frozen.get(group as usize).copied().unwrap_or(false)
    }

    /// Cells of `partition` that live in non-frozen groups.
    pub fn mutable_cells(&self, partition: &Partition) -> Vec<usize> {
        (0..partition.len())
            .filter(|&idx| !self.is_frozen(partition.group_of(idx)))
            .collect()
    }

    /// True iff `group` has exactly `group_size` distinct members forming a
    /// single connected component of the cell graph.
    pub fn is_valid_group(&self, group: &[usize]) -> bool {
        let mut members = group.to_vec();
        members.sort_unstable();
        members.dedup();
        members.len() == group.len()
            && members.len() == self.group_size
            && self.is_connected(&members)
    }

    pub fn is_valid_solution(&self, partition: &Partition) -> bool {
        self.check_solution(partition).is_ok()
    }

    /// Validates `partition`, stopping at the first violation.
    ///
    /// Group sizes and connectivity are checked group by group in chain
    /// order before any pin rule is looked at.
    pub fn check_solution(&self, partition: &Partition) -> Result<(), Violation> {
        if partition.len() != self.graph.len() {
            return Err(Violation::CellCount {
                expected: self.graph.len(),
                found: partition.len(),
            });
        }

        for (i, members) in partition.decode().iter().enumerate() {
            let group = (i + 1) as GroupId;
            if members.len() != self.group_size {
                return Err(Violation::GroupSize {
                    group,
                    size: members.len(),
                    expected: self.group_size,
                });
            }
            if !self.is_connected(members) {
                return Err(Violation::Disconnected { group });
            }
        }

        for pin in &self.pins {
            match pin.kind {
                PinKind::Exact => {
                    if partition.members(pin.group) != pin.cells {
                        return Err(Violation::PinnedMismatch { group: pin.group });
                    }
                }
                PinKind::Contains => {
                    if let Some(&idx) = pin
                        .cells
                        .iter()
                        .find(|&&idx| partition.group_of(idx) != pin.group)
                    {
                        return Err(Violation::MissingRequired {
                            group: pin.group,
                            cell: self.graph.id_of(idx),
                        });
                    }
                }
                PinKind::Excludes => {
                    if let Some(&idx) = pin
                        .cells
                        .iter()
                        .find(|&&idx| partition.group_of(idx) == pin.group)
                    {
                        return Err(Violation::ForbiddenPresent {
                            group: pin.group,
                            cell: self.graph.id_of(idx),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Traverses the subgraph induced by `members` (ascending, distinct).
    fn is_connected(&self, members: &[usize]) -> bool {
        is_connected_subgraph(&self.graph, members)
    }
}

/// True iff the ascending, distinct `members` induce one connected component.
/// An empty member list is not connected.
pub(crate) fn is_connected_subgraph(graph: &CellGraph, members: &[usize]) -> bool {
    if members.is_empty() {
        return false;
    }

    let mut visited = vec![false; members.len()];
    let mut stack = vec![0usize];
    visited[0] = true;
    let mut reached = 1;

    while let Some(pos) = stack.pop() {
        for &nb in graph.neighbors(members[pos]) {
            if let Ok(nb_pos) = members.binary_search(&nb) {
                if !visited[nb_pos] {
                    visited[nb_pos] = true;
                    reached += 1;
                    stack.push(nb_pos);
                }
            }
        }
    }

    reached == members.len()
}
