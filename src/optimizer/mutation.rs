use crate::config::SamplingMode;
use crate::constraints::ConstraintChecker;
use crate::partition::Partition;
use fastrand::Rng;

/// Proposes pairwise swaps. It never validates or applies them.
#[derive(Debug, Clone)]
pub struct MoveGenerator {
    pool: Vec<usize>,
}

impl MoveGenerator {
    /// Builds the candidate pool for `mode`. Swaps only ever exchange cells
    /// between mutable groups, so the set of mutable cells of the seed
    /// partition stays the same for the whole run.
    pub fn new(mode: SamplingMode, checker: &ConstraintChecker, seed: &Partition) -> Self {
        let pool = match mode {
            SamplingMode::AllCells => (0..seed.len()).collect(),
            SamplingMode::MutableOnly => checker.mutable_cells(seed),
        };
        Self { pool }
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Two distinct cells drawn uniformly from the pool, or `None` when the
    /// pool holds fewer than two cells.
    #[inline(always)]
    pub fn propose_move(&self, rng: &mut Rng) -> Option<(usize, usize)> {
        let n = self.pool.len();
        if n < 2 {
            return None;
        }
        let i = rng.usize(0..n);
        let mut j = rng.usize(0..n - 1);
        if j >= i {
            j += 1;
        }
        Some((self.pool[i], self.pool[j]))
    }
}

/// New partition with the memberships of `a` and `b` exchanged.
#[inline(always)]
pub fn apply_swap(partition: &Partition, a: usize, b: usize) -> Partition {
    partition.swapped(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposals_are_distinct() {
        let gen = MoveGenerator {
            pool: vec![3, 8, 11],
        };
        let mut rng = Rng::with_seed(7);
        for _ in 0..1_000 {
            let (a, b) = gen.propose_move(&mut rng).unwrap();
            assert_ne!(a, b);
            assert!(gen.pool.contains(&a) && gen.pool.contains(&b));
        }
    }

    #[test]
    fn test_tiny_pool_yields_nothing() {
        let gen = MoveGenerator { pool: vec![4] };
        assert!(gen.propose_move(&mut Rng::with_seed(1)).is_none());
    }
}
