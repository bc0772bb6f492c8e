//! Trigger events reported to game logic
//!
//! The integrator fires a [`TriggerEvent`] for every resolution iteration that
//! picks a named collider. Handlers decide what happens next: they can push a
//! velocity impulse into the entity for the current tick, and they own the set
//! of colliders that sweeps should skip from now on.

use crate::body::ColliderKey;
use sweepbox_math::Vec3;

/// A named collider was hit during a resolution iteration
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerEvent {
    /// Collider that was hit
    pub key: ColliderKey,
    /// Its name
    pub name: String,
}

/// Receives trigger events from [`KinematicEntity::step`](crate::KinematicEntity::step)
pub trait TriggerHandler {
    /// Whether sweeps should skip this collider entirely
    fn is_ignored(&self, _key: ColliderKey) -> bool {
        false
    }

    /// Called once per resolution iteration that hits a named collider
    ///
    /// Anything added to `impulse` is added to the entity's velocity at the
    /// end of the current tick.
    fn on_trigger(&mut self, event: &TriggerEvent, impulse: &mut Vec3);
}

/// Ignores every event
impl TriggerHandler for () {
    fn on_trigger(&mut self, _event: &TriggerEvent, _impulse: &mut Vec3) {}
}

/// Records every event in order
impl TriggerHandler for Vec<TriggerEvent> {
    fn on_trigger(&mut self, event: &TriggerEvent, _impulse: &mut Vec3) {
        self.push(event.clone());
    }
}
