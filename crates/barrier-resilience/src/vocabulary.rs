//! Vocabulary of the transformed graph G': vertices, edges, paths, and the
//! symmetric-difference fold used to accumulate a blocking family into the
//! running set of used edges.
//!
//! G' is never materialized as an explicit edge list; these types only name
//! the handful of vertices/edges that the level-finder and blocking-family
//! finder discover along the way.

use crate::geometry::{Coordinate, Disk};
use std::collections::HashMap;
use std::fmt;

/// A vertex of the transformed graph: either the inbound or outbound half of
/// a disk, or one of the two sentinels (`SOURCE`, `SINK`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vertex {
    /// `-1` for `SOURCE`/`SINK`, otherwise the disk's stable index.
    pub disk_index: i64,
    /// Inbound vertices have a single outgoing edge, to the outbound vertex
    /// of the same disk. Outbound vertices have a single incoming edge,
    /// from the inbound vertex of the same disk.
    pub inbound: bool,
}

impl Vertex {
    pub const fn disk(index: i64, inbound: bool) -> Self {
        Self {
            disk_index: index,
            inbound,
        }
    }

    pub fn is_source(self) -> bool {
        self == SOURCE
    }

    pub fn is_sink(self) -> bool {
        self == SINK
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.disk_index, self.inbound)
    }
}

/// The source sentinel: `disk_index = -1`, `inbound = false` (it behaves
/// like an outbound vertex with many outgoing edges).
pub const SOURCE: Vertex = Vertex {
    disk_index: -1,
    inbound: false,
};

/// The sink sentinel: `disk_index = -1`, `inbound = true`.
pub const SINK: Vertex = Vertex {
    disk_index: -1,
    inbound: true,
};

/// A directed edge of G'. Can be source -> inbound(i), outbound(i) -> sink,
/// outbound(i) -> inbound(j), or the internal edge inbound(i) -> outbound(i).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
}

impl Edge {
    pub fn new(from: Vertex, to: Vertex) -> Self {
        Self { from, to }
    }

    pub fn from_source(to: Vertex) -> Self {
        Self { from: SOURCE, to }
    }

    pub fn to_sink(from: Vertex) -> Self {
        Self { from, to: SINK }
    }

    /// True for the internal edge joining the two halves of a single disk.
    pub fn is_internal(self) -> bool {
        self.from.disk_index == self.to.disk_index
    }

    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A directed source-to-sink path in G', as a sequence of edges.
pub type Path = Vec<Edge>;

/// Assigns stable `0..n` indices to a freshly-received disk list. Must run
/// exactly once, at solve entry, before any vertex/edge is derived from the
/// disks.
pub fn assign_indices<T: Coordinate>(disks: &mut [Disk<T>]) {
    for (i, disk) in disks.iter_mut().enumerate() {
        disk.index = i as i64;
    }
}

/// Folds a newly found blocking family into the running edge set by
/// symmetric difference: an edge already present whose reverse now appears
/// in the family cancels out (the augmenting step undid it); anything else
/// is added.
pub fn fold_blocking_family(edges: Vec<Edge>, paths: &[Path]) -> Vec<Edge> {
    let mut kept: HashMap<Edge, ()> = edges.into_iter().map(|e| (e, ())).collect();

    for path in paths {
        for &edge in path {
            let reverse = edge.reversed();
            if kept.remove(&reverse).is_none() {
                kept.insert(edge, ());
            }
        }
    }

    kept.into_keys().collect()
}
