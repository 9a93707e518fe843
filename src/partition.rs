use crate::core_types::{Assignment, CellId, GroupId};
use crate::error::{PackForgeError, PfResult};
use crate::graph::CellGraph;

/// A total cell -> group mapping, indexed by the graph's dense cell index.
///
/// Groups are numbered 1..=group_count. Conversions to and from the
/// persisted text form and to per-group member lists live here so every
/// other module decodes partitions the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    groups: Vec<GroupId>,
    group_count: usize,
}

impl Partition {
    pub fn new(groups: Vec<GroupId>, group_count: usize) -> PfResult<Self> {
        if let Some((idx, &g)) = groups
            .iter()
            .enumerate()
            .find(|&(_, &g)| g == 0 || g as usize > group_count)
        {
            return Err(PackForgeError::MalformedInput(format!(
                "cell index {} is assigned to group {}, expected 1..={}",
                idx, g, group_count
            )));
        }
        Ok(Self {
            groups,
            group_count,
        })
    }

    /// Decodes the persisted `{"cell": "group"}` form. Every cell of the
    /// graph must be assigned exactly once.
    pub fn from_assignment(
        assignment: &Assignment,
        graph: &CellGraph,
        group_count: usize,
    ) -> PfResult<Self> {
        let mut groups: Vec<GroupId> = vec![0; graph.len()];

        for (cell_str, group_str) in assignment {
            let id: CellId = cell_str.trim().parse().map_err(|_| {
                PackForgeError::MalformedInput(format!("invalid cell id '{}'", cell_str))
            })?;
            let group: GroupId = group_str.trim().parse().map_err(|_| {
                PackForgeError::MalformedInput(format!(
                    "cell {} has invalid group '{}'",
                    id, group_str
                ))
            })?;
            let idx = graph.index_of(id).ok_or_else(|| {
                PackForgeError::MalformedInput(format!("assignment names unknown cell {}", id))
            })?;
            if groups[idx] != 0 {
                return Err(PackForgeError::MalformedInput(format!(
                    "cell {} is assigned twice",
                    id
                )));
            }
            groups[idx] = group;
        }

        if let Some(idx) = groups.iter().position(|&g| g == 0) {
            return Err(PackForgeError::MalformedInput(format!(
                "cell {} has no group",
                graph.id_of(idx)
            )));
        }

        Self::new(groups, group_count)
    }

    /// Builds a partition from explicit member lists; list i is group i + 1.
    pub fn from_group_lists(lists: &[Vec<CellId>], graph: &CellGraph) -> PfResult<Self> {
        let mut assignment = Assignment::new();
        for (i, list) in lists.iter().enumerate() {
            for id in list {
                let prev = assignment.insert(id.to_string(), (i + 1).to_string());
                if prev.is_some() {
                    return Err(PackForgeError::MalformedInput(format!(
                        "cell {} is listed in more than one group",
                        id
                    )));
                }
            }
        }
        Self::from_assignment(&assignment, graph, lists.len())
    }

    pub fn to_assignment(&self, graph: &CellGraph) -> Assignment {
        self.groups
            .iter()
            .enumerate()
            .map(|(idx, g)| (graph.id_of(idx).to_string(), g.to_string()))
            .collect()
    }

    /// Member cell ids per group, ascending; entry 0 is group 1.
    pub fn to_group_lists(&self, graph: &CellGraph) -> Vec<Vec<CellId>> {
        self.decode()
            .into_iter()
            .map(|members| members.into_iter().map(|i| graph.id_of(i)).collect())
            .collect()
    }

    /// Dense member indices per group, ascending; entry 0 is group 1.
    pub fn decode(&self) -> Vec<Vec<usize>> {
        let mut out = vec![Vec::new(); self.group_count];
        for (idx, &g) in self.groups.iter().enumerate() {
            out[g as usize - 1].push(idx);
        }
        out
    }

    pub fn members(&self, group: GroupId) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|&(_, &g)| g == group)
            .map(|(idx, _)| idx)
            .collect()
    }

    #[inline(always)]
    pub fn group_of(&self, idx: usize) -> GroupId {
        self.groups[idx]
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn as_slice(&self) -> &[GroupId] {
        &self.groups
    }

    /// Copy of `self` with the groups of cells `a` and `b` exchanged.
    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut next = self.clone();
        next.groups.swap(a, b);
        next
    }
}
