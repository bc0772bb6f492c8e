//! Scene serialization
//!
//! Provides Scene struct for loading/saving scenes from RON files.
//! A scene lists placed regions (box colliders plus an optional heightmap),
//! trigger rules and the player spawn.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::SceneError;
use crate::triggers::TriggerRule;
use sweepbox_math::Vec3;
use sweepbox_physics::{Aabb, Heightmap, PhysicsConfig, PhysicsWorld};

/// A serializable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Player feet position
    #[serde(default)]
    pub spawn: Option<Vec3>,
    /// Gravity override for this scene (negative = downward)
    #[serde(default)]
    pub gravity: Option<f32>,
    /// Placed groups of colliders
    #[serde(default)]
    pub regions: Vec<RegionTemplate>,
    /// Rules for named colliders
    #[serde(default)]
    pub triggers: Vec<TriggerRule>,
}

/// A region: colliders and terrain sharing one placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTemplate {
    /// Region label
    pub name: String,
    /// World-space translation
    #[serde(default)]
    pub offset: Vec3,
    /// Source units to world units
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Box colliders in source units
    #[serde(default)]
    pub colliders: Vec<ColliderTemplate>,
    /// Terrain mesh vertices to bake a heightmap from
    #[serde(default)]
    pub heightmap: Option<HeightmapTemplate>,
}

fn default_scale() -> f32 {
    1.0
}

/// A box collider given by two opposite corners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderTemplate {
    /// Name reported to trigger handling; unnamed colliders only block
    #[serde(default)]
    pub name: Option<String>,
    /// First corner
    pub min: Vec3,
    /// Opposite corner
    pub max: Vec3,
}

/// Terrain vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightmapTemplate {
    /// Source-mesh vertices
    pub vertices: Vec<Vec3>,
}

impl HeightmapTemplate {
    /// Evenly spaced `n x n` vertices over `[0, size]` on X and Z, with
    /// heights from `height(x, z)`
    pub fn grid(n: usize, size: f32, height: impl Fn(f32, f32) -> f32) -> Self {
        let step = if n > 1 { size / (n - 1) as f32 } else { 0.0 };
        let mut vertices = Vec::with_capacity(n * n);
        for ix in 0..n {
            for iz in 0..n {
                let (x, z) = (ix as f32 * step, iz as f32 * step);
                vertices.push(Vec3::new(x, height(x, z), z));
            }
        }
        Self { vertices }
    }
}

impl RegionTemplate {
    /// Create an empty region at the origin with unit scale
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset: Vec3::ZERO,
            scale: 1.0,
            colliders: Vec::new(),
            heightmap: None,
        }
    }

    /// Set the placement
    pub fn at(mut self, offset: Vec3, scale: f32) -> Self {
        self.offset = offset;
        self.scale = scale;
        self
    }

    /// Add an unnamed collider
    pub fn with_collider(mut self, min: Vec3, max: Vec3) -> Self {
        self.colliders.push(ColliderTemplate { name: None, min, max });
        self
    }

    /// Add a named collider
    pub fn with_named_collider(mut self, name: impl Into<String>, min: Vec3, max: Vec3) -> Self {
        self.colliders.push(ColliderTemplate {
            name: Some(name.into()),
            min,
            max,
        });
        self
    }

    /// Set the terrain
    pub fn with_heightmap(mut self, heightmap: HeightmapTemplate) -> Self {
        self.heightmap = Some(heightmap);
        self
    }
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spawn: None,
            gravity: None,
            regions: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Set the player spawn position
    pub fn with_spawn(mut self, spawn: Vec3) -> Self {
        self.spawn = Some(spawn);
        self
    }

    /// Set the gravity for this scene
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// Add a region
    pub fn with_region(mut self, region: RegionTemplate) -> Self {
        self.regions.push(region);
        self
    }

    /// Add a trigger rule
    pub fn with_trigger(mut self, rule: TriggerRule) -> Self {
        self.triggers.push(rule);
        self
    }

    /// Build the static physics world for this scene
    ///
    /// The scene's gravity, if set, overrides the one in `config`. Heightmaps
    /// that cannot be baked are skipped with a warning.
    pub fn build_physics(&self, mut config: PhysicsConfig) -> PhysicsWorld {
        if let Some(gravity) = self.gravity {
            config.gravity = gravity;
        }
        let mut world = PhysicsWorld::with_config(config);

        for template in &self.regions {
            let region = world.add_region(template.name.clone(), template.offset, template.scale);

            for collider in &template.colliders {
                world.add_collider(region, collider.name.clone(), Aabb::new(collider.min, collider.max));
            }

            if let Some(terrain) = &template.heightmap {
                match Heightmap::from_vertices(&terrain.vertices) {
                    Some(heightmap) => {
                        world.set_heightmap(region, heightmap);
                    }
                    None => log::warn!("Region '{}' has an unusable heightmap, skipping it", template.name),
                }
            }
        }

        log::info!(
            "Built scene '{}': {} regions, {} colliders",
            self.name,
            world.regions().len(),
            world.collider_count()
        );

        world
    }
}
