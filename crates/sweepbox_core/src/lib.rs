//! World, scene and trigger handling for sweepbox
//!
//! This crate ties the physics core to game logic:
//!
//! - [`Scene`] - Loadable/saveable description of regions, colliders and triggers
//! - [`TriggerLedger`] - Consumed colliders, trigger rules and the event queue
//! - [`World`] - Runs the player through the physics world at a fixed tick

mod error;
mod scene;
mod triggers;
mod world;

pub use error::SceneError;
pub use scene::{ColliderTemplate, HeightmapTemplate, RegionTemplate, Scene};
pub use triggers::{TriggerLedger, TriggerRule, MAX_PENDING_EVENTS};
pub use world::World;

// Re-export commonly used types for convenient access through sweepbox_core
pub use sweepbox_math::Vec3;
pub use sweepbox_physics::{
    Aabb, ColliderKey, KinematicEntity, PhysicsConfig, PhysicsWorld, StepReport, TriggerEvent,
};
