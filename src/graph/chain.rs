use crate::core_types::GroupId;

/// The series ordering of groups: group i is wired to group i + 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainGraph {
    group_count: usize,
}

impl ChainGraph {
    pub fn new(group_count: usize) -> Self {
        Self { group_count }
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Chain neighbors of `group`: one for the two ends, two for interior groups.
    pub fn neighbors(&self, group: GroupId) -> impl Iterator<Item = GroupId> {
        let g = group as usize;
        let prev = (g > 1 && g <= self.group_count).then(|| group - 1);
        let next = (g >= 1 && g < self.group_count).then(|| group + 1);
        prev.into_iter().chain(next)
    }

    /// Consecutive pairs (1,2), (2,3), ... along the chain.
    pub fn links(&self) -> impl Iterator<Item = (GroupId, GroupId)> {
        (1..self.group_count).map(|g| (g as GroupId, (g + 1) as GroupId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_neighbors() {
        let chain = ChainGraph::new(10);
        assert_eq!(chain.neighbors(1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(chain.neighbors(5).collect::<Vec<_>>(), vec![4, 6]);
        assert_eq!(chain.neighbors(10).collect::<Vec<_>>(), vec![9]);
        assert_eq!(chain.links().count(), 9);
    }

    #[test]
    fn test_single_group_chain_has_no_links() {
        let chain = ChainGraph::new(1);
        assert_eq!(chain.neighbors(1).count(), 0);
        assert_eq!(chain.links().count(), 0);
    }
}
