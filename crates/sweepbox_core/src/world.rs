//! World container
//!
//! The World owns the static physics world, the player entity and the trigger
//! ledger, and turns variable frame times into fixed simulation ticks.

use crate::scene::Scene;
use crate::triggers::TriggerLedger;
use sweepbox_math::Vec3;
use sweepbox_physics::{KinematicEntity, PhysicsConfig, PhysicsWorld, StepReport, TriggerEvent};

/// Most ticks a single `update` will run before dropping the backlog
const MAX_TICKS_PER_UPDATE: u32 = 8;

/// The running simulation
pub struct World {
    /// Static colliders, regions and physics configuration
    pub physics: PhysicsWorld,
    /// The player entity
    pub player: KinematicEntity,
    /// Consumed colliders, rules and pending events
    pub triggers: TriggerLedger,
    accumulator: f32,
    ticks: u64,
}

impl World {
    /// Create a world from its parts
    pub fn new(physics: PhysicsWorld, player: KinematicEntity, triggers: TriggerLedger) -> Self {
        Self {
            physics,
            player,
            triggers,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Instantiate a scene
    ///
    /// The player is moved to the scene's spawn point if it has one.
    pub fn from_scene(scene: &Scene, config: PhysicsConfig, mut player: KinematicEntity) -> Self {
        if let Some(spawn) = scene.spawn {
            player.position = spawn;
        }
        player.velocity = Vec3::ZERO;

        let physics = scene.build_physics(config);
        let triggers = TriggerLedger::with_rules(scene.triggers.iter().cloned());
        Self::new(physics, player, triggers)
    }

    /// Run one fixed tick
    ///
    /// Trigger events queue up in [`TriggerLedger`] until [`drain_events`](Self::drain_events)
    /// is called; a caller that never drains keeps only the newest
    /// [`MAX_PENDING_EVENTS`](crate::MAX_PENDING_EVENTS).
    pub fn tick(&mut self) -> StepReport {
        self.ticks += 1;
        let report = self.player.step(&self.physics, &mut self.triggers);
        log::trace!(
            "Tick {}: position {:?}, velocity {:?}, grounded {}",
            self.ticks,
            self.player.position,
            self.player.velocity,
            report.grounded
        );
        report
    }

    /// Advance by `dt` seconds of frame time
    ///
    /// Runs as many fixed ticks as fit in the accumulated time and returns
    /// their reports. Leftover time carries to the next call.
    pub fn update(&mut self, dt: f32) -> Vec<StepReport> {
        let timestep = self.physics.config.timestep;
        if !(timestep > 0.0) || !(dt > 0.0) {
            return Vec::new();
        }

        self.accumulator += dt;
        let mut reports = Vec::new();
        while self.accumulator >= timestep {
            if reports.len() as u32 == MAX_TICKS_PER_UPDATE {
                log::warn!(
                    "Dropping {:.3}s of simulation backlog after {} ticks",
                    self.accumulator,
                    MAX_TICKS_PER_UPDATE
                );
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= timestep;
            reports.push(self.tick());
        }
        reports
    }

    /// Jump if the player is grounded
    pub fn jump(&mut self) -> bool {
        self.player.jump(self.physics.config.gravity)
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Take every trigger event since the last drain
    pub fn drain_events(&mut self) -> Vec<TriggerEvent> {
        self.triggers.drain_events()
    }
}
