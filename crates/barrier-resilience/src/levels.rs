//! Implicit layered BFS: assigns a level (BFS distance from the source) to
//! every reachable vertex of the residual graph R(G', used_edges), without
//! ever materializing R's edge set.
//!
//! Purpose
//! - Dinitz's algorithm needs the level graph to bound DFS search to
//!   shortest-path edges. Here "the edge set" would be quadratic in the
//!   disk count to build explicitly, so instead each layer is discovered
//!   by querying a `ProximityIndex` built from exactly the disks not yet
//!   assigned to an earlier layer, deleting each match as it's found
//!   (amortizing the whole BFS to roughly linear work in the number of
//!   disks actually touched).
//!
//! Why this design
//! - Layers alternate in kind: odd layers are sets of *inbound* vertices
//!   reached by a geometric intersection query (crossing from an outbound
//!   vertex to the inbound vertex of an intersecting disk); even layers are
//!   sets of *outbound* vertices reached by a single pointer hop across
//!   each disk's internal edge, or by walking backwards along `prev` when
//!   the inbound vertex already lies on a used path (so traversing its
//!   internal edge means reversing that path edge instead).
//!
//! References
//! - `examples/original_source/src/barrier_resilience/find_levels.cpp`.

use crate::api::Config;
use crate::error::ResilienceError;
use crate::geometry::{Border, Coordinate, Disk, GeometryObject};
use crate::vocabulary::{Edge, Vertex, SINK, SOURCE};
use std::collections::HashMap;

/// Levels plus enough bookkeeping (`prev`/`next`) for the blocking-family
/// finder and, at the very end, cut extraction to reuse.
pub struct FindLevelsResult {
    pub levels: HashMap<Vertex, i64>,
    pub reachable: bool,
    /// Distance to the sink, if reachable; `-1` otherwise.
    pub distance: i64,
    /// `prev[to] = from` for every edge currently in use.
    pub prev: HashMap<Vertex, Vertex>,
    /// `next[from] = to` for every edge currently in use.
    pub next: HashMap<Vertex, Vertex>,
}

pub fn find_levels<T: Coordinate + 'static>(
    used_edges: &[Edge],
    disks: &[Disk<T>],
    left_border_x: T,
    right_border_x: T,
    config: &Config,
) -> Result<FindLevelsResult, ResilienceError> {
    let mut levels: HashMap<Vertex, i64> = HashMap::new();
    let mut used_disks = vec![false; disks.len()];

    let left_border = Border::new(left_border_x, true);
    let right_border = Border::new(right_border_x, false);

    let mut prev: HashMap<Vertex, Vertex> = HashMap::new();
    let mut next: HashMap<Vertex, Vertex> = HashMap::new();
    for edge in used_edges {
        prev.insert(edge.to, edge.from);
        next.insert(edge.from, edge.to);
    }

    levels.insert(SOURCE, 0);

    let mut index = config.new_index::<T>();
    let mut objects: Vec<GeometryObject<T>> = disks.iter().map(|d| GeometryObject::Disk(*d)).collect();
    objects.push(GeometryObject::Border(right_border));
    index.rebuild(objects)?;

    let mut u_neighbors: Vec<Disk<T>> = Vec::new();

    loop {
        match index.any_intersecting(&GeometryObject::Border(left_border)) {
            Some(found) => {
                index.delete(&found);
                match found {
                    GeometryObject::Disk(d) => u_neighbors.push(d),
                    // The left border touching the right border directly is
                    // not an edge of G' (a zero-hop SOURCE->SINK connection
                    // is not a path); drop it and keep looking for disk
                    // neighbors of SOURCE.
                    GeometryObject::Border(_) => {}
                }
            }
            None => break,
        }
    }

    let mut found_sink = false;
    let mut layer_one: Vec<Vertex> = u_neighbors
        .iter()
        .map(|d| Vertex::disk(d.index, true))
        .filter(|v| prev.get(v) != Some(&SOURCE))
        .collect();

    for &v in &layer_one {
        levels.insert(v, 1);
        used_disks[v.disk_index as usize] = true;
    }

    let mut objects: Vec<GeometryObject<T>> = disks
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_disks[*i])
        .map(|(_, d)| GeometryObject::Disk(*d))
        .collect();
    objects.push(GeometryObject::Border(right_border));
    index.rebuild(objects)?;

    let mut last_layer = std::mem::take(&mut layer_one);
    let mut level = 2i64;

    while !last_layer.is_empty() && !found_sink {
        let mut current_layer: Vec<Vertex> = Vec::new();

        if level % 2 == 0 {
            for &v in &last_layer {
                if !v.inbound {
                    continue;
                }
                match prev.get(&v) {
                    Some(&u) if u == SOURCE => {}
                    Some(&u) => {
                        levels.insert(u, level);
                        current_layer.push(u);
                    }
                    None => {
                        let u = Vertex::disk(v.disk_index, false);
                        levels.insert(u, level);
                        current_layer.push(u);
                    }
                }
            }
        } else {
            for &v in &last_layer {
                if v.inbound {
                    continue;
                }

                let mut neighbors: Vec<Disk<T>> = Vec::new();
                loop {
                    let query = GeometryObject::Disk(disks[v.disk_index as usize]);
                    match index.any_intersecting(&query) {
                        Some(found) => {
                            index.delete(&found);
                            match found {
                                GeometryObject::Disk(d) => neighbors.push(d),
                                GeometryObject::Border(_) => {
                                    found_sink = true;
                                    levels.insert(SINK, level);
                                    break;
                                }
                            }
                        }
                        None => break,
                    }
                }

                if found_sink {
                    for v in &current_layer {
                        levels.remove(v);
                    }
                    current_layer.clear();
                    break;
                }

                if neighbors.is_empty() {
                    continue;
                }

                let has_next = next.get(&v).copied();
                for d in neighbors {
                    let u = Vertex::disk(d.index, true);
                    if has_next == Some(u) {
                        continue;
                    }
                    levels.insert(u, level);
                    current_layer.push(u);
                }
            }
        }

        level += 1;
        last_layer = current_layer;
    }

    let distance = if found_sink { levels[&SINK] } else { -1 };

    Ok(FindLevelsResult { levels, reachable: found_sink, distance, prev, next })
}
