//! Geometry primitives: [`Point3`], [`Vec3`] and [`Aabb`].
//!
//! `Point3` addresses voxel cells; `Vec3`/`Aabb` describe continuous agent
//! positions and bounding boxes in the same coordinate space.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// A 3D integer cell coordinate. Y grows upward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a point shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The cell directly below.
    #[inline]
    pub const fn below(self) -> Self {
        self.shift(0, -1, 0)
    }

    /// The cell directly above.
    #[inline]
    pub const fn above(self) -> Self {
        self.shift(0, 1, 0)
    }
}

impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point3 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Point3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A continuous 3D position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The cell containing this position (component-wise floor).
    #[inline]
    pub fn floor(self) -> Point3 {
        Point3::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// An axis-aligned bounding box. `min` ≤ `max` on each axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new box from two corners and auto-canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// A box of the given edge lengths centered on `center`.
    #[inline]
    pub fn centered(center: Vec3, sx: f64, sy: f64, sz: f64) -> Self {
        let half = Vec3::new(sx / 2.0, sy / 2.0, sz / 2.0);
        Self::new(center - half, center + half)
    }

    /// Edge length along x.
    #[inline]
    pub fn size_x(self) -> f64 {
        self.max.x - self.min.x
    }

    /// Edge length along y.
    #[inline]
    pub fn size_y(self) -> f64 {
        self.max.y - self.min.y
    }

    /// Edge length along z.
    #[inline]
    pub fn size_z(self) -> f64 {
        self.max.z - self.min.z
    }

    /// Mean edge length, the scalar "size" of the box.
    #[inline]
    pub fn mean_size(self) -> f64 {
        (self.size_x() + self.size_y() + self.size_z()) / 3.0
    }

    /// Grow the box by the given amount on each side of each axis.
    /// Negative amounts shrink it.
    #[inline]
    pub fn inflate(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            min: Vec3::new(self.min.x - dx, self.min.y - dy, self.min.z - dz),
            max: Vec3::new(self.max.x + dx, self.max.y + dy, self.max.z + dz),
        }
    }

    /// The cell containing the min corner.
    #[inline]
    pub fn floor_min(self) -> Point3 {
        self.min.floor()
    }

    /// The cell containing the max corner.
    #[inline]
    pub fn floor_max(self) -> Point3 {
        self.max.floor()
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point3::new(1, 2, 3);
        let b = Point3::new(4, 5, 6);
        assert_eq!(a + b, Point3::new(5, 7, 9));
        assert_eq!(b - a, Point3::new(3, 3, 3));
        assert_eq!(a * 2, Point3::new(2, 4, 6));
        assert_eq!(b / 2, Point3::new(2, 2, 3));
    }

    #[test]
    fn point_vertical_neighbors() {
        let p = Point3::new(2, 5, -1);
        assert_eq!(p.below(), Point3::new(2, 4, -1));
        assert_eq!(p.above(), Point3::new(2, 6, -1));
    }

    #[test]
    fn point_ordering_is_y_major() {
        let lo = Point3::new(9, 0, 9);
        let hi = Point3::new(0, 1, 0);
        assert!(lo < hi);
    }

    #[test]
    fn vec_floor_handles_negatives() {
        let v = Vec3::new(1.7, -0.2, 3.0);
        assert_eq!(v.floor(), Point3::new(1, -1, 3));
    }

    #[test]
    fn aabb_auto_canonicalize() {
        let b = Aabb::new(Vec3::new(3.0, 2.0, 1.0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(b.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn aabb_sizes() {
        let b = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.size_x(), 1.0);
        assert_eq!(b.size_y(), 2.0);
        assert_eq!(b.size_z(), 3.0);
        assert_eq!(b.mean_size(), 2.0);
    }

    #[test]
    fn aabb_inflate_is_symmetric() {
        let b = Aabb::centered(Vec3::new(0.5, 0.5, 0.5), 0.6, 0.6, 0.6);
        let grown = b.inflate(0.45, 0.45, 0.45);
        assert!((grown.size_x() - 1.5).abs() < 1e-9);
        assert!((grown.min.x - (0.5 - 0.75)).abs() < 1e-9);
        assert!((grown.max.x - (0.5 + 0.75)).abs() < 1e-9);
    }

    #[test]
    fn aabb_floor_corners() {
        let b = Aabb::new(Vec3::new(0.2, 0.0, 0.2), Vec3::new(1.8, 1.9, 1.8));
        assert_eq!(b.floor_min(), Point3::new(0, 0, 0));
        assert_eq!(b.floor_max(), Point3::new(1, 1, 1));
    }
}
