//! Collision shapes
//!
//! The only shape the movement system needs is an axis-aligned box.

use serde::{Deserialize, Serialize};
use sweepbox_math::Vec3;

/// An axis-aligned bounding box defined by two opposite corners
///
/// The corners are stored as given. Nothing guarantees `a <= b` on every axis
/// (baked collider data lists "most positive" and "most negative" corners in
/// either order), so every query goes through [`min`](Aabb::min) and
/// [`max`](Aabb::max).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// First corner
    pub a: Vec3,
    /// Opposite corner
    pub b: Vec3,
}

impl Aabb {
    /// Create a new box from two opposite corners, in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }

    /// Create a box centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Upright box standing on `feet`
    ///
    /// Horizontal extent is `feet.xz ± width / 2`, vertical extent is
    /// `[feet.y, feet.y + height]`.
    pub fn standing(feet: Vec3, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Self::new(
            Vec3::new(feet.x - half, feet.y, feet.z - half),
            Vec3::new(feet.x + half, feet.y + height, feet.z + half),
        )
    }

    /// Component-wise minimum corner
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.a.min_components(self.b)
    }

    /// Component-wise maximum corner
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.a.max_components(self.b)
    }

    /// Get the center of the box
    pub fn center(&self) -> Vec3 {
        (self.a + self.b) * 0.5
    }

    /// Get the full size in each dimension
    pub fn size(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Translate the box by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        Self::new(self.a + delta, self.b + delta)
    }

    /// Check if a point is strictly inside the box
    pub fn contains(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        (0..3).all(|axis| point[axis] > min[axis] && point[axis] < max[axis])
    }

    /// Check if two boxes overlap
    ///
    /// On every axis the overlap length `min(A.max, B.max) - max(A.min, B.min)`
    /// must be strictly positive, so boxes that only share a face do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let overlap = self.max().min_components(other.max()) - self.min().max_components(other.min());
        overlap.x > 0.0 && overlap.y > 0.0 && overlap.z > 0.0
    }
}
