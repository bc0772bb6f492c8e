//! Swept AABB collision and kinematic movement for sweepbox
//!
//! This crate provides:
//! - Axis-aligned boxes and the slab sweep test
//! - Heightmaps baked from terrain vertices
//! - A static collider registry split into placed regions
//! - The fixed-tick kinematic integrator with friction, drag and jumping
//! - A trigger seam for game logic reacting to named colliders

pub mod body;
pub mod collision;
pub mod entity;
pub mod heightmap;
pub mod material;
pub mod shapes;
pub mod trigger;
pub mod world;

// Re-export commonly used types
pub use body::{ColliderKey, RegionId, StaticCollider};
pub use collision::{sweep_aabb, BlockedAxes, PotentialCollision, SweepHit};
pub use entity::{KinematicEntity, StepReport, DEFAULT_HEIGHT, DEFAULT_JUMP_HEIGHT, DEFAULT_WIDTH};
pub use heightmap::Heightmap;
pub use material::{apply_friction, DragProfiles, MotionState};
pub use shapes::Aabb;
pub use trigger::{TriggerEvent, TriggerHandler};
pub use world::{PhysicsConfig, PhysicsWorld, Region};
