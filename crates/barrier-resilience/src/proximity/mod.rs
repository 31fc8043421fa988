//! Proximity index abstraction.
//!
//! Purpose
//! - The level-finder and blocking-family finder never enumerate the edge
//!   set of the transformed graph. Instead, at each step they ask "does
//!   anything still in this bag intersect this disk (or border)?" and, if
//!   so, remove the answer and ask again. A `ProximityIndex` is that bag.
//!
//! Why this design
//! - `rebuild`/`any_intersecting`/`delete` is exactly the trio the layered
//!   BFS and DFS need, and nothing more: no insertion after `rebuild`, no
//!   range queries, no ordering.
//! - Keeping the trait this narrow is what lets a drop-in nearest-neighbour
//!   structure (`kdtree`) stand in for the correctness baseline (`linear`)
//!   without either side knowing about the other.
//!
//! References
//! - `examples/original_source/src/data_structure/data_structure.hpp`.

pub mod kdtree;
pub mod linear;

use crate::error::ResilienceError;
use crate::geometry::{Coordinate, GeometryObject};

/// A queryable bag of disks and borders supporting "find one intersecting
/// object" and "remove an object", the two primitives the layered search
/// needs.
pub trait ProximityIndex<T: Coordinate> {
    /// Replaces the index's contents with `objects`. Fails only if the
    /// chosen representation cannot hold this particular set (the k-d tree
    /// variant requires every disk to share a radius).
    fn rebuild(&mut self, objects: Vec<GeometryObject<T>>) -> Result<(), ResilienceError>;

    /// Returns one arbitrary stored object intersecting `object`, or `None`
    /// if nothing does. Which one is returned when several intersect is
    /// unspecified; callers must not depend on a particular choice.
    fn any_intersecting(&self, object: &GeometryObject<T>) -> Option<GeometryObject<T>>;

    /// Removes `object` from the index if present. A no-op otherwise.
    fn delete(&mut self, object: &GeometryObject<T>);
}

pub use kdtree::KdTreeIndex;
pub use linear::LinearScanIndex;
