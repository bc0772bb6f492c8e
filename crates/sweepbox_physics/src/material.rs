//! Per-axis friction and drag coefficients for the kinematic integrator

use serde::{Deserialize, Serialize};
use sweepbox_math::Vec3;

/// Motion classification used to pick a coefficient set each tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// Standing on a collider or heightmap
    Grounded,
    /// Airborne and moving up
    Rising,
    /// Airborne and moving down or level
    Falling,
}

impl MotionState {
    /// Classify from the grounded flag and vertical velocity
    pub fn classify(grounded: bool, velocity_y: f32) -> Self {
        if grounded {
            MotionState::Grounded
        } else if velocity_y > 0.0 {
            MotionState::Rising
        } else {
            MotionState::Falling
        }
    }
}

/// The three coefficient sets an entity moves with
///
/// Each set scales both the acceleration applied this tick and the velocity
/// decay at the end of the tick, per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragProfiles {
    /// Friction while grounded
    pub grounded: Vec3,
    /// Air drag while rising; no vertical drag so jumps reach their apex
    pub rising: Vec3,
    /// Air drag while falling
    pub falling: Vec3,
}

impl Default for DragProfiles {
    fn default() -> Self {
        Self {
            grounded: Vec3::new(20.0, 20.0, 20.0),
            rising: Vec3::new(1.8, 0.0, 1.8),
            falling: Vec3::new(1.8, 0.4, 1.8),
        }
    }
}

impl DragProfiles {
    /// Coefficients for a motion state
    pub fn for_state(&self, state: MotionState) -> Vec3 {
        match state {
            MotionState::Grounded => self.grounded,
            MotionState::Rising => self.rising,
            MotionState::Falling => self.falling,
        }
    }
}

/// The component of `a` or `b` with the smaller magnitude, per axis
///
/// Ties return `b`.
pub fn abs_min(a: Vec3, b: Vec3) -> Vec3 {
    let pick = |x: f32, y: f32| if x.abs() < y.abs() { x } else { y };
    Vec3::new(pick(a.x, b.x), pick(a.y, b.y), pick(a.z, b.z))
}

/// Decay velocity by `velocity * coefficients * dt`
///
/// The decay is capped at the velocity itself, so a component can reach zero
/// but never change sign, however large `coefficients * dt` is.
pub fn apply_friction(velocity: Vec3, coefficients: Vec3, dt: f32) -> Vec3 {
    let decay = velocity.component_mul(coefficients) * dt;
    velocity - abs_min(decay, velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let drag = DragProfiles::default();
        assert_eq!(drag.grounded, Vec3::splat(20.0));
        assert_eq!(drag.rising.y, 0.0);
        assert_eq!(drag.falling.y, 0.4);
        // Grounded always has the highest friction
        for axis in 0..3 {
            assert!(drag.grounded[axis] > drag.rising[axis]);
            assert!(drag.grounded[axis] > drag.falling[axis]);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(MotionState::classify(true, -3.0), MotionState::Grounded);
        assert_eq!(MotionState::classify(false, 2.0), MotionState::Rising);
        assert_eq!(MotionState::classify(false, 0.0), MotionState::Falling);
        assert_eq!(MotionState::classify(false, -0.1), MotionState::Falling);
    }

    #[test]
    fn test_for_state() {
        let drag = DragProfiles::default();
        assert_eq!(drag.for_state(MotionState::Falling), drag.falling);
        assert_eq!(drag.for_state(MotionState::Grounded), drag.grounded);
    }

    #[test]
    fn test_friction_decays_toward_zero() {
        let v = apply_friction(Vec3::new(6.0, -3.0, 0.0), Vec3::splat(1.8), 1.0 / 60.0);
        assert!(v.x > 0.0 && v.x < 6.0);
        assert!(v.y < 0.0 && v.y > -3.0);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_friction_never_flips_sign() {
        let velocities = [-100.0f32, -1.0, -0.001, 0.0, 0.001, 1.0, 100.0];
        let coefficients = [0.0f32, 0.4, 1.8, 20.0, 60.0, 1000.0];
        let steps = [1.0f32 / 60.0, 0.1, 1.0, 5.0];

        for &v in &velocities {
            for &c in &coefficients {
                for &dt in &steps {
                    let out = apply_friction(Vec3::new(v, v, v), Vec3::splat(c), dt);
                    assert!(
                        out.x == 0.0 || out.x.signum() == v.signum(),
                        "v={} c={} dt={} gave {}",
                        v, c, dt, out.x
                    );
                    assert!(out.x.abs() <= v.abs());
                }
            }
        }
    }

    #[test]
    fn test_friction_overshoot_clamps_to_zero() {
        // 20 * 0.1 = 2 would reverse the velocity without the cap
        let v = apply_friction(Vec3::new(5.0, -5.0, 1.0), Vec3::splat(20.0), 0.1);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_abs_min() {
        let m = abs_min(Vec3::new(-1.0, 4.0, 2.0), Vec3::new(3.0, -2.0, 2.0));
        assert_eq!(m, Vec3::new(-1.0, -2.0, 2.0));
    }

    #[test]
    fn test_abs_min_tie_picks_second() {
        let m = abs_min(Vec3::new(-2.0, 0.5, 3.0), Vec3::new(2.0, -0.5, 3.0));
        assert_eq!(m, Vec3::new(2.0, -0.5, 3.0));

        // A decay equal and opposite to the velocity is capped to the velocity
        let v = apply_friction(Vec3::new(3.0, -1.0, 0.0), Vec3::splat(-2.0), 0.5);
        assert_eq!(v, Vec3::ZERO);
    }
}
