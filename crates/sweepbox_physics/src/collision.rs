//! Swept AABB collision detection
//!
//! Implements the slab (ray-vs-box) sweep of a moving box against a static box
//! over one tick's displacement, and a bitflag summary of which axes were
//! blocked during a tick.

use bitflags::bitflags;

use crate::body::ColliderKey;
use crate::shapes::Aabb;
use sweepbox_math::Vec3;

bitflags! {
    /// Axes blocked while resolving one tick
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BlockedAxes: u8 {
        /// A collider stopped movement along X
        const X = 1 << 0;
        /// A collider stopped movement along Y
        const Y = 1 << 1;
        /// A collider stopped movement along Z
        const Z = 1 << 2;
        /// Landed on the top face of a collider
        const GROUND = 1 << 3;
        /// Popped up onto a heightmap
        const HEIGHTMAP = 1 << 4;
    }
}

impl BlockedAxes {
    /// Flags for a single-axis hit normal
    pub fn from_normal(normal: Vec3) -> Self {
        let mut flags = Self::empty();
        if normal.x != 0.0 {
            flags |= Self::X;
        }
        if normal.y != 0.0 {
            flags |= Self::Y;
        }
        if normal.z != 0.0 {
            flags |= Self::Z;
        }
        if normal.y > 0.0 {
            flags |= Self::GROUND;
        }
        flags
    }
}

/// Result of a successful sweep
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    /// Fraction of the displacement at which the boxes start touching, in `[0, 1)`
    pub entry_time: f32,
    /// Contact normal: exactly one axis is ±1, pointing against the motion
    pub normal: Vec3,
}

/// A collision candidate picked during one resolution iteration
#[derive(Clone, Debug, PartialEq)]
pub struct PotentialCollision {
    /// Fraction of the tick's displacement at which contact begins
    pub entry_time: f32,
    /// Contact normal
    pub normal: Vec3,
    /// Collider that was hit
    pub key: ColliderKey,
    /// Name of the collider that was hit, if it has one
    pub name: Option<String>,
}

impl PotentialCollision {
    /// Index of the axis the normal points along
    pub fn axis(&self) -> usize {
        if self.normal.x != 0.0 {
            0
        } else if self.normal.y != 0.0 {
            1
        } else {
            2
        }
    }
}

/// Time for a signed gap to close at velocity `v`
///
/// With `v == 0` the gap never closes: a positive gap means this face is
/// already behind the box (no constraint), otherwise it never reaches it.
#[inline]
fn time_to_close(gap: f32, v: f32) -> f32 {
    if v != 0.0 {
        gap / v
    } else if gap > 0.0 {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    }
}

/// Entry and exit times along one axis
#[inline]
fn axis_times(moving_min: f32, moving_max: f32, target_min: f32, target_max: f32, v: f32) -> (f32, f32) {
    if v > 0.0 {
        (
            time_to_close(target_min - moving_max, v),
            time_to_close(target_max - moving_min, v),
        )
    } else {
        (
            time_to_close(target_max - moving_min, v),
            time_to_close(target_min - moving_max, v),
        )
    }
}

/// Sweep `moving` along `displacement` against a static `target`
///
/// Returns `None` when the boxes do not come into contact within this tick:
/// - every entry time is negative (this includes boxes that already overlap
///   at the start of the tick, which are reported as a miss),
/// - any entry time is beyond the end of the tick,
/// - the per-axis overlap intervals never coincide,
/// - or the inputs are NaN.
///
/// On a hit, the normal is along the axis with the latest entry time. Ties go
/// to the later axis in x, y, z order, so a perfect corner hit resolves on Z
/// before Y before X.
pub fn sweep_aabb(moving: &Aabb, target: &Aabb, displacement: Vec3) -> Option<SweepHit> {
    let (m_min, m_max) = (moving.min(), moving.max());
    let (t_min, t_max) = (target.min(), target.max());

    let mut entry = [0.0f32; 3];
    let mut exit = [0.0f32; 3];
    for axis in 0..3 {
        let (en, ex) = axis_times(m_min[axis], m_max[axis], t_min[axis], t_max[axis], displacement[axis]);
        entry[axis] = en;
        exit[axis] = ex;
    }

    // NaN times have no ordering, so they can never produce a hit
    if entry.iter().chain(exit.iter()).any(|t| t.is_nan()) {
        return None;
    }
    if entry.iter().all(|&t| t < 0.0) {
        return None;
    }
    if entry.iter().any(|&t| t > 1.0) {
        return None;
    }

    let mut hit_axis = 0;
    for axis in 1..3 {
        if entry[axis] >= entry[hit_axis] {
            hit_axis = axis;
        }
    }
    let entry_time = entry[hit_axis];
    let exit_time = exit[0].min(exit[1]).min(exit[2]);

    if entry_time > exit_time {
        return None;
    }

    if entry_time < 1.0 {
        let mut normal = Vec3::ZERO;
        normal[hit_axis] = if displacement[hit_axis] > 0.0 { -1.0 } else { 1.0 };
        Some(SweepHit { entry_time, normal })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Vec3::new(x, y, z), Vec3::new(x + 1.0, y + 1.0, z + 1.0))
    }

    #[test]
    fn test_head_on_x() {
        let moving = unit_at(0.0, 0.0, 0.0);
        let wall = unit_at(3.0, 0.0, 0.0);

        let hit = sweep_aabb(&moving, &wall, Vec3::new(4.0, 0.0, 0.0)).expect("should hit");
        assert!((hit.entry_time - 0.5).abs() < EPSILON);
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_entry_time_is_gap_over_tick_displacement() {
        let speed = 5.0f32;
        let dt = 1.0f32 / 60.0;
        let gap = 0.05f32;
        let moving = Aabb::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5));
        let wall = Aabb::new(Vec3::new(0.5 + gap, -1.0, -1.0), Vec3::new(1.0, 2.0, 1.0));

        let hit = sweep_aabb(&moving, &wall, Vec3::new(speed * dt, 0.0, 0.0)).expect("should hit");
        assert!((hit.entry_time - (gap / speed) / dt).abs() < EPSILON);
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_normal_opposes_motion() {
        let moving = unit_at(0.0, 3.0, 0.0);
        let floor = Aabb::new(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        let hit = sweep_aabb(&moving, &floor, Vec3::new(0.0, -4.0, 0.0)).expect("should land");
        assert_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0));
        assert!((hit.entry_time - 0.75).abs() < EPSILON);

        let moving = unit_at(0.0, 0.0, 3.0);
        let wall = unit_at(0.0, 0.0, 0.0);
        let hit = sweep_aabb(&moving, &wall, Vec3::new(0.0, 0.0, -4.0)).expect("should hit");
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_out_of_reach_is_miss() {
        let moving = unit_at(0.0, 0.0, 0.0);
        let wall = unit_at(3.0, 0.0, 0.0);
        assert!(sweep_aabb(&moving, &wall, Vec3::new(1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_reaching_exactly_at_end_of_tick_is_miss() {
        let moving = unit_at(0.0, 0.0, 0.0);
        let wall = unit_at(2.0, 0.0, 0.0);
        assert!(sweep_aabb(&moving, &wall, Vec3::new(1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_moving_away_is_miss() {
        let moving = unit_at(0.0, 0.0, 0.0);
        let wall = unit_at(3.0, 0.0, 0.0);
        assert!(sweep_aabb(&moving, &wall, Vec3::new(-4.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_passing_beside_is_miss() {
        let moving = unit_at(0.0, 0.0, 0.0);
        let wall = unit_at(3.0, 0.0, 2.0);
        assert!(sweep_aabb(&moving, &wall, Vec3::new(4.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_diagonal_intervals_never_align_is_miss() {
        // Leaves the Z slab before reaching the X slab
        let moving = unit_at(0.0, 0.0, 0.0);
        let target = Aabb::new(Vec3::new(2.0, 0.0, -0.6), Vec3::new(3.0, 1.0, -0.5));
        assert!(sweep_aabb(&moving, &target, Vec3::new(2.0, 0.0, -4.0)).is_none());
    }

    #[test]
    fn test_zero_velocity_never_hits() {
        let a = unit_at(0.0, 0.0, 0.0);
        // separated
        assert!(sweep_aabb(&a, &unit_at(1.5, 0.0, 0.0), Vec3::ZERO).is_none());
        // touching
        assert!(sweep_aabb(&a, &unit_at(1.0, 0.0, 0.0), Vec3::ZERO).is_none());
        // overlapping
        assert!(sweep_aabb(&a, &unit_at(0.5, 0.5, 0.5), Vec3::ZERO).is_none());
    }

    #[test]
    fn test_already_overlapping_is_miss() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(0.5, 0.0, 0.0);
        assert!(a.overlaps(&b));
        assert!(sweep_aabb(&a, &b, Vec3::new(0.25, 0.0, 0.0)).is_none());
        assert!(sweep_aabb(&a, &b, Vec3::new(0.0, -0.25, 0.0)).is_none());
    }

    #[test]
    fn test_touching_then_moving_in_hits_at_zero() {
        let moving = unit_at(0.0, 0.0, 0.0);
        let wall = unit_at(1.0, 0.0, 0.0);
        let hit = sweep_aabb(&moving, &wall, Vec3::new(0.5, 0.0, 0.0)).expect("should hit");
        assert_eq!(hit.entry_time, 0.0);
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_corner_tie_prefers_later_axis() {
        let moving = unit_at(0.0, 0.0, 0.0);

        // X and Y enter at the same time: Y wins
        let target = unit_at(2.0, 2.0, 0.0);
        let hit = sweep_aabb(&moving, &target, Vec3::new(2.0, 2.0, 0.0)).expect("should hit");
        assert!((hit.entry_time - 0.5).abs() < EPSILON);
        assert_eq!(hit.normal, Vec3::new(0.0, -1.0, 0.0));

        // All three tie: Z wins
        let target = unit_at(2.0, 2.0, 2.0);
        let hit = sweep_aabb(&moving, &target, Vec3::new(2.0, 2.0, 2.0)).expect("should hit");
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_unordered_corners_sweep_like_ordered() {
        let moving = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);
        let wall = Aabb::new(Vec3::new(4.0, 1.0, 1.0), Vec3::new(3.0, 0.0, 0.0));
        let hit = sweep_aabb(&moving, &wall, Vec3::new(4.0, 0.0, 0.0)).expect("should hit");
        assert!((hit.entry_time - 0.5).abs() < EPSILON);
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_nan_is_miss() {
        let moving = unit_at(0.0, 0.0, 0.0);
        let wall = unit_at(3.0, 0.0, 0.0);
        assert!(sweep_aabb(&moving, &wall, Vec3::new(f32::NAN, 0.0, 0.0)).is_none());
        assert!(sweep_aabb(&moving, &wall, Vec3::new(4.0, f32::NAN, 0.0)).is_none());
    }

    #[test]
    fn test_blocked_axes_from_normal() {
        assert_eq!(BlockedAxes::from_normal(Vec3::new(-1.0, 0.0, 0.0)), BlockedAxes::X);
        assert_eq!(
            BlockedAxes::from_normal(Vec3::new(0.0, 1.0, 0.0)),
            BlockedAxes::Y | BlockedAxes::GROUND
        );
        assert_eq!(BlockedAxes::from_normal(Vec3::new(0.0, -1.0, 0.0)), BlockedAxes::Y);
        assert_eq!(BlockedAxes::from_normal(Vec3::ZERO), BlockedAxes::empty());
    }
}
