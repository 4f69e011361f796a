use std::collections::HashSet;

use crate::board::{BoardTopology, EdgeId, VertexId};

/// Length of the longest trail through a player's road network.
///
/// A trail never reuses an edge but may revisit a vertex. Depth-first search
/// with backtracking from both endpoints of every owned edge; the visited set
/// holds edges only.
pub fn longest_trail(topology: &BoardTopology, roads: &HashSet<EdgeId>) -> usize {
    let mut best = 0;
    let mut visited: HashSet<EdgeId> = HashSet::new();
    for &edge in roads {
        let (a, b) = topology.edge_vertices(edge);
        best = best.max(walk(topology, roads, a, &mut visited));
        best = best.max(walk(topology, roads, b, &mut visited));
    }
    best
}

fn walk(
    topology: &BoardTopology,
    roads: &HashSet<EdgeId>,
    at: VertexId,
    visited: &mut HashSet<EdgeId>,
) -> usize {
    let mut best = 0;
    for &edge in topology.vertex_edges(at) {
        if !roads.contains(&edge) || visited.contains(&edge) {
            continue;
        }
        let (a, b) = topology.edge_vertices(edge);
        let next = if a == at { b } else { a };
        visited.insert(edge);
        best = best.max(1 + walk(topology, roads, next, visited));
        visited.remove(&edge);
    }
    best
}
