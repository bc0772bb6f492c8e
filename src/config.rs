//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SBX_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use sweepbox_math::Vec3;
use sweepbox_physics::{DragProfiles, KinematicEntity, DEFAULT_HEIGHT, DEFAULT_JUMP_HEIGHT, DEFAULT_WIDTH};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fixed-tick driver configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Player entity configuration
    #[serde(default)]
    pub entity: EntityConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SBX_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SBX_PHYSICS__GRAVITY=-20 -> physics.gravity = -20
        figment = figment.merge(Env::prefixed("SBX_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Fixed-tick driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of frames the headless demo runs
    pub frames: u32,
    /// Frame time fed to the world each frame, in seconds
    pub frame_time: f32,
    /// Scripted walking speed along the player's heading
    pub move_speed: f32,
    /// Turn rate in radians per second
    pub turn_rate: f32,
    /// Attempt a jump every N frames (0 disables)
    pub jump_interval: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_time: 1.0 / 60.0,
            move_speed: 3.0,
            turn_rate: 0.3,
            jump_interval: 90,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity (negative = downward)
    pub gravity: f32,
    /// Fixed simulation step in seconds
    pub timestep: f32,
    /// Collision resolution passes per tick
    pub max_resolution_iterations: u32,
    /// Safety margin subtracted from entry times
    pub entry_epsilon: f32,
    /// Friction while grounded [x, y, z]
    pub grounded_friction: [f32; 3],
    /// Air drag while rising [x, y, z]
    pub rising_drag: [f32; 3],
    /// Air drag while falling [x, y, z]
    pub falling_drag: [f32; 3],
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let physics = sweepbox_physics::PhysicsConfig::default();
        Self {
            gravity: physics.gravity,
            timestep: physics.timestep,
            max_resolution_iterations: physics.max_resolution_iterations,
            entry_epsilon: physics.entry_epsilon,
            grounded_friction: physics.drag.grounded.to_array(),
            rising_drag: physics.drag.rising.to_array(),
            falling_drag: physics.drag.falling.to_array(),
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's configuration
    pub fn to_physics_config(&self) -> sweepbox_physics::PhysicsConfig {
        let mut timestep = self.timestep;
        if !(timestep > 0.0) {
            log::warn!("Invalid physics timestep {}, falling back to 1/60", timestep);
            timestep = 1.0 / 60.0;
        }

        sweepbox_physics::PhysicsConfig {
            gravity: self.gravity,
            timestep,
            max_resolution_iterations: self.max_resolution_iterations,
            entry_epsilon: self.entry_epsilon,
            drag: DragProfiles {
                grounded: Vec3::from_array(self.grounded_friction),
                rising: Vec3::from_array(self.rising_drag),
                falling: Vec3::from_array(self.falling_drag),
            },
        }
    }
}

/// Player entity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// Spawn override [x, y, z]; the scene's spawn is used when unset
    pub spawn: Option<[f32; 3]>,
    /// Full horizontal extent of the collider
    pub width: f32,
    /// Vertical extent of the collider
    pub height: f32,
    /// Jump apex height
    pub jump_height: f32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            spawn: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            jump_height: DEFAULT_JUMP_HEIGHT,
        }
    }
}

impl EntityConfig {
    /// Build the player entity at the origin
    pub fn to_entity(&self) -> KinematicEntity {
        KinematicEntity::new(Vec3::ZERO, self.width, self.height).with_jump_height(self.jump_height)
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the scene file
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/demo.ron".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the player state every N ticks (0 disables)
    pub report_interval: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 60,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
