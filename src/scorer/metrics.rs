use crate::core_types::GroupId;
use crate::error::{PackForgeError, PfResult};
use crate::graph::{CellGraph, ChainGraph};
use crate::partition::Partition;
use std::collections::VecDeque;

/// Edge counts across each chain link; entry i is the surface between
/// groups i + 1 and i + 2.
pub fn surface_areas(graph: &CellGraph, partition: &Partition, chain: &ChainGraph) -> Vec<usize> {
    let mut areas = vec![0usize; chain.group_count().saturating_sub(1)];
    for a in 0..graph.len() {
        let ga = partition.group_of(a);
        for &b in graph.neighbors(a) {
            if b <= a {
                continue;
            }
            let gb = partition.group_of(b);
            if ga.abs_diff(gb) == 1 {
                areas[ga.min(gb) as usize - 1] += 1;
            }
        }
    }
    areas
}

/// Per-group stress: edges shared with the group's chain neighbor(s).
pub fn stresses(surface_areas: &[usize], chain: &ChainGraph) -> Vec<usize> {
    (1..=chain.group_count())
        .map(|g| {
            chain
                .neighbors(g as GroupId)
                .map(|nb| surface_areas[(g as GroupId).min(nb) as usize - 1])
                .sum()
        })
        .collect()
}

/// Sample standard deviation (n - 1 denominator). Fewer than two values
/// have no spread and yield 0.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (ss / (n - 1) as f64).sqrt()
}

pub fn edge_cooling(graph: &CellGraph, groups: &[Vec<usize>]) -> usize {
    groups
        .iter()
        .map(|members| members.iter().filter(|&&i| graph.is_edge_cell(i)).count())
        .sum()
}

/// Diameter plus mean pairwise hop distance of the subgraph induced by
/// `members` (ascending). Distances use only edges inside the group.
pub fn group_spread(graph: &CellGraph, members: &[usize], group: GroupId) -> PfResult<f64> {
    let k = members.len();
    if k == 0 {
        return Err(PackForgeError::DisconnectedGroup { group });
    }

    let mut max_dist = 0usize;
    let mut total_dist = 0usize;
    let mut dist = vec![usize::MAX; k];
    let mut queue = VecDeque::with_capacity(k);

    for source in 0..k {
        dist.fill(usize::MAX);
        dist[source] = 0;
        queue.push_back(source);
        let mut reached = 1;

        while let Some(pos) = queue.pop_front() {
            let d = dist[pos];
            for &nb in graph.neighbors(members[pos]) {
                if let Ok(nb_pos) = members.binary_search(&nb) {
                    if dist[nb_pos] == usize::MAX {
                        dist[nb_pos] = d + 1;
                        reached += 1;
                        total_dist += d + 1;
                        max_dist = max_dist.max(d + 1);
                        queue.push_back(nb_pos);
                    }
                }
            }
        }

        if reached != k {
            return Err(PackForgeError::DisconnectedGroup { group });
        }
    }

    let mean = if k > 1 {
        total_dist as f64 / (k * (k - 1)) as f64
    } else {
        0.0
    };
    Ok(max_dist as f64 + mean)
}

pub fn centroid(graph: &CellGraph, members: &[usize], group: GroupId) -> PfResult<(f64, f64)> {
    if members.is_empty() {
        return Err(PackForgeError::DisconnectedGroup { group });
    }
    let (sx, sy) = members.iter().fold((0.0, 0.0), |(sx, sy), &i| {
        let (x, y) = graph.position(i);
        (sx + x, sy + y)
    });
    let n = members.len() as f64;
    Ok((sx / n, sy / n))
}

/// Euclidean length of the polyline through consecutive group centroids.
pub fn current_path_length(centroids: &[(f64, f64)], chain: &ChainGraph) -> f64 {
    chain
        .links()
        .map(|(a, b)| {
            let (ax, ay) = centroids[a as usize - 1];
            let (bx, by) = centroids[b as usize - 1];
            ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
        })
        .sum()
}
