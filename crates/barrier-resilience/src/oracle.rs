//! Ford-Fulkerson oracle over the explicit vertex-split graph.
//!
//! Purpose
//! -------
//! An independent, deliberately naive re-derivation of the barrier
//! resilience number: build every vertex and edge of G' up front as a
//! plain adjacency list, then run textbook BFS-augmenting Ford-Fulkerson
//! (Edmonds-Karp). Since every edge of G' has unit capacity this is also
//! what the original calls the Even-Tarjan bound. This exists only to
//! cross-check [`crate::resilience_count`] in property tests; it is never
//! part of the public API and its O(n^2) graph construction is fine only
//! because property tests keep instance sizes small.
//!
//! References
//! ----------
//! `examples/original_source/src/with_graph_construction/ford_fulkerson.cpp`,
//! `examples/original_source/src/with_graph_construction/even_tarjan.cpp`.

use crate::geometry::{disk_border_intersect, disks_intersect, Border, Coordinate, Disk};
use crate::vocabulary::{assign_indices, Vertex, SINK, SOURCE};
use std::collections::{HashMap, HashSet, VecDeque};

fn build_graph<T: Coordinate>(
    disks: &[Disk<T>],
    left_border_x: T,
    right_border_x: T,
) -> HashMap<Vertex, Vec<Vertex>> {
    let mut graph: HashMap<Vertex, Vec<Vertex>> = HashMap::new();
    let left = Border::new(left_border_x, true);
    let right = Border::new(right_border_x, false);

    for d in disks {
        let v_in = Vertex::disk(d.index, true);
        let v_out = Vertex::disk(d.index, false);
        graph.entry(v_in).or_default().push(v_out);

        if disk_border_intersect(d, &left) {
            graph.entry(SOURCE).or_default().push(v_in);
        }
        if disk_border_intersect(d, &right) {
            graph.entry(v_out).or_default().push(SINK);
        }
    }

    for a in disks {
        for b in disks {
            if a.index == b.index {
                continue;
            }
            if disks_intersect(a, b) {
                graph
                    .entry(Vertex::disk(a.index, false))
                    .or_default()
                    .push(Vertex::disk(b.index, true));
            }
        }
    }

    graph
}

/// Residual graph plus the forward/reverse blocking map, seeded from a
/// forward-only graph (every forward edge is unblocked, its reverse
/// starts blocked).
fn prepare_residual_graph(
    graph: &HashMap<Vertex, Vec<Vertex>>,
) -> (HashMap<Vertex, Vec<Vertex>>, HashMap<(Vertex, Vertex), bool>) {
    let mut residual: HashMap<Vertex, Vec<Vertex>> = HashMap::new();
    let mut blocked: HashMap<(Vertex, Vertex), bool> = HashMap::new();

    for (&u, neighbors) in graph {
        for &v in neighbors {
            residual.entry(u).or_default().push(v);
            residual.entry(v).or_default().push(u);
            blocked.insert((u, v), false);
            blocked.insert((v, u), true);
        }
    }

    (residual, blocked)
}

fn bfs_augmenting_path(
    residual: &HashMap<Vertex, Vec<Vertex>>,
    blocked: &HashMap<(Vertex, Vertex), bool>,
) -> Option<Vec<Vertex>> {
    let mut parent: HashMap<Vertex, Vertex> = HashMap::new();
    let mut visited: HashSet<Vertex> = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(SOURCE);
    visited.insert(SOURCE);

    while let Some(u) = queue.pop_front() {
        if u == SINK {
            let mut path = vec![SINK];
            let mut cursor = SINK;
            while let Some(&p) = parent.get(&cursor) {
                path.push(p);
                cursor = p;
            }
            path.reverse();
            return Some(path);
        }

        let empty = Vec::new();
        for &v in residual.get(&u).unwrap_or(&empty) {
            if !visited.contains(&v) && !blocked.get(&(u, v)).copied().unwrap_or(true) {
                visited.insert(v);
                parent.insert(v, u);
                queue.push_back(v);
            }
        }
    }

    None
}

fn ford_fulkerson_max_flow(graph: &HashMap<Vertex, Vec<Vertex>>) -> i64 {
    let (residual, mut blocked) = prepare_residual_graph(graph);
    let mut flow = 0i64;

    while let Some(path) = bfs_augmenting_path(&residual, &blocked) {
        for window in path.windows(2) {
            let (u, v) = (window[0], window[1]);
            blocked.insert((u, v), true);
            blocked.insert((v, u), false);
        }
        flow += 1;
    }

    flow
}

/// Computes the barrier resilience number by explicit max flow, for
/// cross-checking [`crate::resilience_count`] in property tests.
pub fn oracle_resilience_count<T: Coordinate>(mut disks: Vec<Disk<T>>, left_border_x: T, right_border_x: T) -> i64 {
    assign_indices(&mut disks);
    if disks.is_empty() {
        return 0;
    }
    let graph = build_graph(&disks, left_border_x, right_border_x);
    ford_fulkerson_max_flow(&graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Disk;
    use nalgebra::vector;

    #[test]
    fn agrees_with_single_blocking_chain() {
        let disks = vec![Disk::new(vector![0i64, 0], 1), Disk::new(vector![2i64, 0], 1)];
        assert_eq!(oracle_resilience_count(disks, -1, 3), 1);
    }

    #[test]
    fn agrees_with_two_disjoint_chains() {
        let disks = vec![Disk::new(vector![0i64, 0], 1), Disk::new(vector![0i64, 20], 1)];
        assert_eq!(oracle_resilience_count(disks, -1, 1), 2);
    }

    #[test]
    fn agrees_with_empty_instance() {
        let disks: Vec<Disk<i64>> = Vec::new();
        assert_eq!(oracle_resilience_count(disks, -1, 1), 0);
    }
}
