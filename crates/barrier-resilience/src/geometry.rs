//! Disks, borders and the intersection predicates between them.
//!
//! Every comparison works on squared distances so integer coordinates never
//! need a square root (and never lose exactness to one).

use nalgebra::{Scalar, Vector2};
use std::ops::{Add, Mul, Sub};

/// Coordinate types a barrier-resilience instance can be built over.
///
/// Blanket-implemented for `i64` and `f64`, the two required
/// instantiations.
pub trait Coordinate:
    Scalar + Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
}

impl<T> Coordinate for T where
    T: Scalar + Copy + PartialOrd + Add<Output = T> + Sub<Output = T> + Mul<Output = T>
{
}

/// A disk with a stable index assigned once at solve entry.
///
/// Equality ignores `index`: two disks with the same centre and radius but
/// different indices are the same disk for every geometric purpose.
#[derive(Clone, Copy, Debug)]
pub struct Disk<T: Coordinate> {
    pub centre: Vector2<T>,
    pub radius: T,
    /// `-1` until `assign_indices` runs at solve entry.
    pub index: i64,
}

impl<T: Coordinate> Disk<T> {
    pub fn new(centre: Vector2<T>, radius: T) -> Self {
        Self {
            centre,
            radius,
            index: -1,
        }
    }
}

impl<T: Coordinate> PartialEq for Disk<T> {
    fn eq(&self, other: &Self) -> bool {
        self.centre == other.centre && self.radius == other.radius
    }
}

/// A vertical barrier: the line `x = x_coord`, tagged left or right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border<T: Coordinate> {
    pub x: T,
    pub is_left: bool,
}

impl<T: Coordinate> Border<T> {
    pub fn new(x: T, is_left: bool) -> Self {
        Self { x, is_left }
    }
}

/// Either half of the proximity index's stored universe.
#[derive(Clone, Copy, Debug)]
pub enum GeometryObject<T: Coordinate> {
    Disk(Disk<T>),
    Border(Border<T>),
}

impl<T: Coordinate> PartialEq for GeometryObject<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Disk(a), Self::Disk(b)) => a == b,
            (Self::Border(a), Self::Border(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Coordinate> From<Disk<T>> for GeometryObject<T> {
    fn from(d: Disk<T>) -> Self {
        Self::Disk(d)
    }
}

impl<T: Coordinate> From<Border<T>> for GeometryObject<T> {
    fn from(b: Border<T>) -> Self {
        Self::Border(b)
    }
}

#[inline]
fn squared_distance<T: Coordinate>(a: Vector2<T>, b: Vector2<T>) -> T {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Two disks intersect iff the distance between centres does not exceed the
/// sum of radii (tangent disks count as intersecting).
pub fn disks_intersect<T: Coordinate>(a: &Disk<T>, b: &Disk<T>) -> bool {
    let sum = a.radius + b.radius;
    squared_distance(a.centre, b.centre) <= sum * sum
}

/// A disk intersects a border iff it reaches across the border's x line.
pub fn disk_border_intersect<T: Coordinate>(d: &Disk<T>, b: &Border<T>) -> bool {
    if b.is_left {
        d.centre.x - d.radius <= b.x
    } else {
        b.x <= d.centre.x + d.radius
    }
}

/// Two borders intersect iff they share an orientation, or the left one is
/// not strictly to the left of the right one.
pub fn borders_intersect<T: Coordinate>(a: &Border<T>, b: &Border<T>) -> bool {
    if a.is_left == b.is_left {
        return true;
    }
    let (left, right) = if a.is_left { (a, b) } else { (b, a) };
    left.x >= right.x
}

/// Polymorphic intersection predicate dispatching on the object tags.
pub fn intersects<T: Coordinate>(a: &GeometryObject<T>, b: &GeometryObject<T>) -> bool {
    match (a, b) {
        (GeometryObject::Disk(d1), GeometryObject::Disk(d2)) => disks_intersect(d1, d2),
        (GeometryObject::Disk(d), GeometryObject::Border(border))
        | (GeometryObject::Border(border), GeometryObject::Disk(d)) => {
            disk_border_intersect(d, border)
        }
        (GeometryObject::Border(b1), GeometryObject::Border(b2)) => borders_intersect(b1, b2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn tangent_disks_intersect() {
        let a = Disk::new(vector![0i64, 0], 1);
        let b = Disk::new(vector![2i64, 0], 1);
        assert!(disks_intersect(&a, &b));
    }

    #[test]
    fn far_disks_do_not_intersect() {
        let a = Disk::new(vector![0i64, 0], 1);
        let b = Disk::new(vector![3i64, 0], 1);
        assert!(!disks_intersect(&a, &b));
    }

    #[test]
    fn disk_reaches_left_border() {
        let d = Disk::new(vector![0.0, 0.0], 2.0);
        let left = Border::new(-2.0, true);
        assert!(disk_border_intersect(&d, &left));
        let left_far = Border::new(-1.5, true);
        assert!(!disk_border_intersect(&d, &left_far));
    }

    #[test]
    fn disk_reaches_right_border() {
        let d = Disk::new(vector![0.0, 0.0], 2.0);
        let right = Border::new(2.0, false);
        assert!(disk_border_intersect(&d, &right));
        let right_far = Border::new(2.5, false);
        assert!(!disk_border_intersect(&d, &right_far));
    }

    #[test]
    fn same_orientation_borders_always_intersect() {
        let a = Border::new(0i64, true);
        let b = Border::new(100, true);
        assert!(borders_intersect(&a, &b));
    }

    #[test]
    fn opposite_orientation_borders_intersect_iff_overlapping() {
        let left = Border::new(5i64, true);
        let right = Border::new(3, false);
        assert!(borders_intersect(&left, &right));
        let right_far = Border::new(10, false);
        assert!(!borders_intersect(&left, &right_far));
    }

    #[test]
    fn equality_ignores_index() {
        let mut a = Disk::new(vector![1i64, 2], 3);
        a.index = 5;
        let mut b = Disk::new(vector![1i64, 2], 3);
        b.index = 9;
        assert_eq!(a, b);
    }
}
