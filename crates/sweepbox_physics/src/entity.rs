//! Kinematic entity movement
//!
//! A [`KinematicEntity`] is an upright box driven by velocity, with
//! collisions resolved by sweeping against the static world. It is not a
//! rigid body: there is no mass, rotation only steers the camera, and contacts
//! simply zero the blocked velocity component.
//!
//! Each call to [`KinematicEntity::step`] runs one fixed tick:
//! 1. pick friction/drag coefficients from the motion state
//! 2. apply the pending acceleration, then clear it
//! 3. rebuild the collider
//! 4. clear `grounded` and the trigger impulse
//! 5. up to N passes: move to the earliest contact on its axis and stop there
//! 6. pop up onto any heightmap the feet sank into
//! 7. integrate position with what velocity remains
//! 8. apply gravity
//! 9. apply friction/drag decay
//! 10. add trigger impulses to velocity

use crate::collision::{BlockedAxes, PotentialCollision};
use crate::material::{apply_friction, MotionState};
use crate::shapes::Aabb;
use crate::trigger::{TriggerEvent, TriggerHandler};
use crate::world::PhysicsWorld;
use sweepbox_math::{mat4, Mat4, Vec3};

/// Default entity width
pub const DEFAULT_WIDTH: f32 = 0.5;

/// Default entity height
pub const DEFAULT_HEIGHT: f32 = 1.8;

/// Default jump apex height
pub const DEFAULT_JUMP_HEIGHT: f32 = 1.0;

/// Camera height as a fraction of the entity height
const EYE_LEVEL: f32 = 0.9;

/// Pitch limit in degrees
const MAX_PITCH_DEGREES: f32 = 89.0;

/// What happened during one tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// The contact picked by each resolution pass, in order
    pub contacts: Vec<PotentialCollision>,
    /// Whether a heightmap popped the entity up this tick
    pub heightmap_contact: bool,
    /// Summary of blocked axes
    pub blocked: BlockedAxes,
    /// Grounded state at the end of the tick
    pub grounded: bool,
}

/// An entity moved by the swept-AABB integrator
#[derive(Clone, Debug)]
pub struct KinematicEntity {
    /// Feet position (bottom center of the collider)
    pub position: Vec3,
    /// Heading around world Y, radians
    pub yaw: f32,
    /// Look angle above the horizon, radians
    pub pitch: f32,
    /// Current velocity
    pub velocity: Vec3,
    /// Full horizontal extent of the collider
    pub width: f32,
    /// Vertical extent of the collider
    pub height: f32,
    /// Apex height of a jump
    pub jump_height: f32,
    /// Whether the entity stood on something at the end of the last tick
    pub grounded: bool,
    acceleration: Vec3,
    collider: Aabb,
}

impl KinematicEntity {
    /// Create a new entity standing at `position`
    pub fn new(position: Vec3, width: f32, height: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            width,
            height,
            jump_height: DEFAULT_JUMP_HEIGHT,
            grounded: false,
            acceleration: Vec3::ZERO,
            collider: Aabb::standing(position, width, height),
        }
    }

    /// Set the jump apex height
    pub fn with_jump_height(mut self, jump_height: f32) -> Self {
        self.jump_height = jump_height;
        self
    }

    /// Request acceleration for the next tick
    ///
    /// Requests accumulate until the next [`step`](Self::step), which applies
    /// and clears them.
    pub fn accelerate(&mut self, acceleration: Vec3) {
        self.acceleration += acceleration;
    }

    /// Acceleration waiting to be applied
    pub fn pending_acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Turn the view; pitch is clamped short of straight up or down
    pub fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let limit = MAX_PITCH_DEGREES.to_radians();
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-limit, limit);
    }

    /// Jump if grounded
    ///
    /// Sets the vertical velocity that reaches `jump_height` under `gravity`.
    /// Only velocity changes: `grounded` stays set until the next step, so the
    /// launch tick still decays with grounded friction.
    /// Returns whether the jump happened.
    pub fn jump(&mut self, gravity: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = (2.0 * gravity.abs() * self.jump_height).sqrt();
        true
    }

    /// Collider as of the last rebuild
    pub fn collider(&self) -> Aabb {
        self.collider
    }

    /// Collider for the current position and size
    pub fn current_collider(&self) -> Aabb {
        Aabb::standing(self.position, self.width, self.height)
    }

    /// Camera position
    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::Y * (self.height * EYE_LEVEL)
    }

    /// Horizontal unit heading the camera faces
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// View matrix from the eye position, yaw and pitch
    pub fn view_matrix(&self) -> Mat4 {
        mat4::view(self.eye(), self.yaw, self.pitch)
    }

    /// Advance one tick through `world`
    ///
    /// `handler` is told about every resolution pass that hits a named
    /// collider, and decides which colliders sweeps skip.
    pub fn step<H: TriggerHandler + ?Sized>(&mut self, world: &PhysicsWorld, handler: &mut H) -> StepReport {
        let config = &world.config;
        let dt = config.timestep;

        let coefficients = config
            .drag
            .for_state(MotionState::classify(self.grounded, self.velocity.y));

        self.velocity += self.acceleration.component_mul(coefficients) * dt;
        self.acceleration = Vec3::ZERO;

        self.collider = self.current_collider();

        self.grounded = false;
        let mut impulse = Vec3::ZERO;
        let mut report = StepReport::default();

        for _ in 0..config.max_resolution_iterations {
            self.collider = self.current_collider();
            let displacement = self.velocity * dt;

            let Some(hit) = world.earliest_collision(&self.collider, displacement, |key| handler.is_ignored(key)) else {
                break;
            };

            let axis = hit.axis();
            log::debug!(
                "Collision on axis {} at t={:.4} with {:?} (normal {:?})",
                axis, hit.entry_time, hit.name, hit.normal
            );

            if let Some(name) = &hit.name {
                let event = TriggerEvent { key: hit.key, name: name.clone() };
                handler.on_trigger(&event, &mut impulse);
            }

            self.position[axis] += displacement[axis] * (hit.entry_time - config.entry_epsilon);
            self.velocity[axis] = 0.0;
            if hit.normal.y > 0.0 {
                self.grounded = true;
            }

            report.blocked |= BlockedAxes::from_normal(hit.normal);
            report.contacts.push(hit);
        }

        // Heightmaps pop the entity up rather than being swept. A standing
        // entity sits exactly on the ground, so "at ground and not rising" counts.
        for region in world.regions() {
            let Some(ground) = region.ground_height(self.position) else {
                continue;
            };
            let sunk = self.position.y < ground;
            let resting = self.position.y <= ground && self.velocity.y <= 0.0;
            if sunk || resting {
                self.position.y = ground;
                self.velocity.y = 0.0;
                self.grounded = true;
                report.heightmap_contact = true;
                report.blocked |= BlockedAxes::HEIGHTMAP | BlockedAxes::GROUND;
            }
        }

        self.position += self.velocity * dt;
        self.velocity.y += config.gravity * dt;
        self.velocity = apply_friction(self.velocity, coefficients, dt);
        self.velocity += impulse;

        self.collider = self.current_collider();
        report.grounded = self.grounded;
        report
    }
}
