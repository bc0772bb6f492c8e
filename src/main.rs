//! sweepbox - headless movement demo
//!
//! Loads the configuration and a scene, then walks the player through it at a
//! fixed tick, logging trigger events and periodic state reports.

use sweepbox::config::AppConfig;
use sweepbox_core::{Scene, World};
use sweepbox_math::Vec3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.debug.log_level)).init();

    let scene = Scene::load(&config.scene.path).map_err(|e| {
        log::error!("Failed to load scene '{}': {}", config.scene.path, e);
        e
    })?;

    let mut world = World::from_scene(&scene, config.physics.to_physics_config(), config.entity.to_entity());
    if let Some(spawn) = config.entity.spawn {
        world.player.position = Vec3::from_array(spawn);
    }
    log::info!("Scene '{}' ready, player at {:?}", scene.name, world.player.position);

    let sim = &config.simulation;
    for frame in 1..=sim.frames {
        // Scripted input: walk forward while slowly turning, hop now and then
        world.player.look(sim.turn_rate * sim.frame_time, 0.0);
        let heading = world.player.forward();
        world.player.accelerate(heading * sim.move_speed);

        if sim.jump_interval > 0 && frame % sim.jump_interval == 0 && world.jump() {
            log::debug!("Frame {}: jump", frame);
        }

        let first_tick = world.tick_count() + 1;
        let reports = world.update(sim.frame_time);
        let interval = u64::from(config.debug.report_interval);
        for (tick, report) in (first_tick..).zip(&reports) {
            if interval > 0 && tick % interval == 0 {
                log::info!(
                    "Tick {}: {} contacts, grounded {}, blocked {:?}, player at {:?}",
                    tick,
                    report.contacts.len(),
                    report.grounded,
                    report.blocked,
                    world.player.position
                );
            }
        }

        for event in world.drain_events() {
            log::info!("Frame {}: triggered '{}'", frame, event.name);
        }
    }

    log::info!(
        "Finished after {} ticks at {:?} ({} colliders consumed)",
        world.tick_count(),
        world.player.position,
        world.triggers.consumed_count()
    );

    Ok(())
}
