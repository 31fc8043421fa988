//! Equal-radius 2D k-d tree proximity index.
//!
//! Purpose
//! - A faster stand-in for `LinearScanIndex` when every stored disk shares
//!   a radius. Two equal-radius disks intersect iff the distance between
//!   their centres is at most twice that radius, a monotone function of
//!   distance, so "does anything intersect this disk" reduces to "is the
//!   nearest neighbour within range".
//! - That reduction is exactly what makes a plain nearest-neighbour tree
//!   usable here; it would not hold for disks of differing radii, which is
//!   why `rebuild` rejects a non-uniform set.
//!
//! Why this design
//! - The original backs this with CGAL's incremental orthogonal nearest
//!   neighbour search over a dynamic tree.
//! - We rebuild a static, depth-alternating median-split tree on every
//!   `rebuild` call (the algorithm never inserts after a rebuild, only
//!   deletes) and track removals with a soft-delete set keyed by disk
//!   index, so a deleted node's subtree is still walked but the node
//!   itself is never reported as a match.
//!
//! References
//! - `examples/original_source/src/data_structure/kdtree.hpp`.

use crate::error::ResilienceError;
use crate::geometry::{intersects, Border, Coordinate, Disk, GeometryObject};
use crate::proximity::ProximityIndex;
use nalgebra::Vector2;
use std::collections::HashSet;

struct Node<T: Coordinate> {
    point: Vector2<T>,
    index: i64,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

pub struct KdTreeIndex<T: Coordinate> {
    root: Option<Box<Node<T>>>,
    disks: Vec<Disk<T>>,
    deleted: HashSet<i64>,
    borders: Vec<Border<T>>,
    radius: Option<T>,
}

impl<T: Coordinate> Default for KdTreeIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Coordinate> KdTreeIndex<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            disks: Vec::new(),
            deleted: HashSet::new(),
            borders: Vec::new(),
            radius: None,
        }
    }

    fn build(points: &mut [(Vector2<T>, i64)], depth: usize) -> Option<Box<Node<T>>> {
        if points.is_empty() {
            return None;
        }
        let axis = depth % 2;
        points.sort_by(|a, b| axis_value(a.0, axis).partial_cmp(&axis_value(b.0, axis)).unwrap());
        let mid = points.len() / 2;
        let (point, index) = points[mid];
        let left = Self::build(&mut points[..mid], depth + 1);
        let right = Self::build(&mut points[mid + 1..], depth + 1);
        Some(Box::new(Node { point, index, left, right }))
    }

    fn nearest<'a>(
        &self,
        node: &'a Node<T>,
        target: Vector2<T>,
        depth: usize,
        best: &mut Option<(T, i64, Vector2<T>)>,
    ) {
        if !self.deleted.contains(&node.index) {
            let d = squared_distance(node.point, target);
            let better = match best {
                Some((best_d, _, _)) => d < *best_d,
                None => true,
            };
            if better {
                *best = Some((d, node.index, node.point));
            }
        }

        let axis = depth % 2;
        let go_left = axis_value(target, axis) < axis_value(node.point, axis);
        let (near, far) = if go_left {
            (&node.left, &node.right)
        } else {
            (&node.right, &node.left)
        };

        if let Some(near_node) = near {
            self.nearest(near_node, target, depth + 1, best);
        }

        let axis_gap = axis_value(target, axis) - axis_value(node.point, axis);
        let axis_gap_sq = axis_gap * axis_gap;
        let should_check_far = match best {
            Some((best_d, _, _)) => axis_gap_sq < *best_d,
            None => true,
        };
        if should_check_far {
            if let Some(far_node) = far {
                self.nearest(far_node, target, depth + 1, best);
            }
        }
    }

    fn nearest_disk(&self, centre: Vector2<T>) -> Option<Disk<T>> {
        let root = self.root.as_ref()?;
        let radius = self.radius?;
        let mut best = None;
        self.nearest(root, centre, 0, &mut best);
        best.map(|(_, index, point)| Disk { centre: point, radius, index })
    }
}

#[inline]
fn axis_value<T: Coordinate>(p: Vector2<T>, axis: usize) -> T {
    if axis == 0 {
        p.x
    } else {
        p.y
    }
}

#[inline]
fn squared_distance<T: Coordinate>(a: Vector2<T>, b: Vector2<T>) -> T {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

impl<T: Coordinate> ProximityIndex<T> for KdTreeIndex<T> {
    fn rebuild(&mut self, objects: Vec<GeometryObject<T>>) -> Result<(), ResilienceError> {
        let mut disks = Vec::new();
        let mut borders = Vec::new();
        let mut radius = None;

        for object in objects {
            match object {
                GeometryObject::Disk(d) => {
                    match radius {
                        None => radius = Some(d.radius),
                        Some(r) if r == d.radius => {}
                        Some(_) => {
                            return Err(ResilienceError::UnsupportedConfig(
                                "k-d tree index requires every disk to share a radius".into(),
                            ))
                        }
                    }
                    disks.push(d);
                }
                GeometryObject::Border(b) => borders.push(b),
            }
        }

        let mut points: Vec<(Vector2<T>, i64)> = disks.iter().map(|d| (d.centre, d.index)).collect();
        self.root = Self::build(&mut points, 0);
        self.disks = disks;
        self.borders = borders;
        self.radius = radius;
        self.deleted.clear();
        Ok(())
    }

    fn any_intersecting(&self, object: &GeometryObject<T>) -> Option<GeometryObject<T>> {
        match object {
            GeometryObject::Border(query) => {
                for border in &self.borders {
                    if intersects(&GeometryObject::Border(*border), &GeometryObject::Border(*query)) {
                        return Some(GeometryObject::Border(*border));
                    }
                }
                for disk in &self.disks {
                    if self.deleted.contains(&disk.index) {
                        continue;
                    }
                    if intersects(&GeometryObject::Disk(*disk), &GeometryObject::Border(*query)) {
                        return Some(GeometryObject::Disk(*disk));
                    }
                }
                None
            }
            GeometryObject::Disk(query) => {
                for border in &self.borders {
                    if intersects(&GeometryObject::Border(*border), &GeometryObject::Disk(*query)) {
                        return Some(GeometryObject::Border(*border));
                    }
                }
                let candidate = self.nearest_disk(query.centre)?;
                if intersects(&GeometryObject::Disk(candidate), &GeometryObject::Disk(*query)) {
                    Some(GeometryObject::Disk(candidate))
                } else {
                    None
                }
            }
        }
    }

    fn delete(&mut self, object: &GeometryObject<T>) {
        match object {
            GeometryObject::Disk(d) => {
                self.deleted.insert(d.index);
            }
            GeometryObject::Border(b) => {
                if let Some(pos) = self.borders.iter().position(|existing| existing == b) {
                    self.borders.remove(pos);
                }
            }
        }
    }
}
