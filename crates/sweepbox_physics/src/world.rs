//! Static collider registry and physics configuration

use crate::body::{ColliderKey, RegionId, StaticCollider};
use crate::collision::{sweep_aabb, PotentialCollision};
use crate::heightmap::Heightmap;
use crate::material::DragProfiles;
use crate::shapes::Aabb;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use sweepbox_math::Vec3;

/// Configuration for the movement simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration (applied to Y-axis, negative = down)
    pub gravity: f32,
    /// Fixed simulation step in seconds
    pub timestep: f32,
    /// Upper bound on collision resolution passes per tick
    pub max_resolution_iterations: u32,
    /// Safety margin subtracted from each entry time before moving to contact
    pub entry_epsilon: f32,
    /// Friction and drag coefficient sets
    pub drag: DragProfiles,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            timestep: 1.0 / 60.0,
            max_resolution_iterations: 3,
            entry_epsilon: 0.001,
            drag: DragProfiles::default(),
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }
}

/// A placed group of colliders sharing one offset and unit scale
///
/// Colliders are registered in the region's local (source-mesh) units and
/// stored in world units. A region carries at most one heightmap, sampled
/// through the same placement.
#[derive(Clone, Debug)]
pub struct Region {
    /// Label used in logs
    pub name: String,
    /// World-space translation applied to everything in the region
    pub offset: Vec3,
    /// Source-mesh units to world units
    pub scale: f32,
    colliders: Vec<ColliderKey>,
    heightmap: Option<Heightmap>,
}

impl Region {
    fn new(name: String, offset: Vec3, scale: f32) -> Self {
        Self {
            name,
            offset,
            scale,
            colliders: Vec::new(),
            heightmap: None,
        }
    }

    /// Convert a point from region-local units to world units
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local * self.scale + self.offset
    }

    /// Keys of this region's colliders, in registration order
    pub fn colliders(&self) -> &[ColliderKey] {
        &self.colliders
    }

    /// The region's heightmap, if it has one
    pub fn heightmap(&self) -> Option<&Heightmap> {
        self.heightmap.as_ref()
    }

    /// Ground height under a world position, in world units
    ///
    /// `None` if the region has no heightmap or the position is outside it.
    pub fn ground_height(&self, world: Vec3) -> Option<f32> {
        self.heightmap.as_ref()?.sample(world, self.offset, self.scale)
    }
}

/// The static world an entity moves through
///
/// Holds every collider in a generational slot map and keeps per-region
/// registration order, so iteration is stable and deterministic.
pub struct PhysicsWorld {
    colliders: SlotMap<ColliderKey, StaticCollider>,
    regions: Vec<Region>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            regions: Vec::new(),
            config,
        }
    }

    /// Add an empty region and return its id
    pub fn add_region(&mut self, name: impl Into<String>, offset: Vec3, scale: f32) -> RegionId {
        let id = RegionId(self.regions.len());
        let region = Region::new(name.into(), offset, scale);
        log::debug!("Added region '{}' at {:?} (scale {})", region.name, offset, scale);
        self.regions.push(region);
        id
    }

    /// Get a region by id
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    /// All regions in creation order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Attach a heightmap to a region, replacing any previous one
    ///
    /// Returns `false` if the region does not exist.
    pub fn set_heightmap(&mut self, id: RegionId, heightmap: Heightmap) -> bool {
        match self.regions.get_mut(id.0) {
            Some(region) => {
                region.heightmap = Some(heightmap);
                true
            }
            None => false,
        }
    }

    /// Register a collider given in region-local units
    ///
    /// Returns `None` if the region does not exist.
    pub fn add_collider(&mut self, id: RegionId, name: Option<String>, local: Aabb) -> Option<ColliderKey> {
        let region = self.regions.get_mut(id.0)?;
        let aabb = Aabb::new(
            local.a * region.scale + region.offset,
            local.b * region.scale + region.offset,
        );
        let key = self.colliders.insert(StaticCollider::new(name, aabb, id));
        region.colliders.push(key);
        Some(key)
    }

    /// Remove a collider and return it
    pub fn remove_collider(&mut self, key: ColliderKey) -> Option<StaticCollider> {
        let collider = self.colliders.remove(key)?;
        if let Some(region) = self.regions.get_mut(collider.region.0) {
            region.colliders.retain(|&k| k != key);
        }
        Some(collider)
    }

    /// Move a region and everything in it by `delta` world units
    pub fn translate_region(&mut self, id: RegionId, delta: Vec3) -> bool {
        let Some(region) = self.regions.get_mut(id.0) else {
            return false;
        };
        region.offset += delta;
        for &key in &region.colliders {
            if let Some(collider) = self.colliders.get_mut(key) {
                collider.aabb = collider.aabb.translated(delta);
            }
        }
        true
    }

    /// Get a collider by key
    pub fn collider(&self, key: ColliderKey) -> Option<&StaticCollider> {
        self.colliders.get(key)
    }

    /// First collider registered under `name`
    pub fn find_collider(&self, name: &str) -> Option<ColliderKey> {
        self.colliders().find(|(_, c)| c.name() == Some(name)).map(|(key, _)| key)
    }

    /// Number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// All colliders, region by region in registration order
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderKey, &StaticCollider)> + '_ {
        self.regions
            .iter()
            .flat_map(|region| region.colliders.iter())
            .filter_map(|&key| self.colliders.get(key).map(|c| (key, c)))
    }

    /// Earliest collider `moving` runs into along `displacement`
    ///
    /// Colliders for which `is_ignored` returns true are skipped. Among equal
    /// entry times the first collider in iteration order wins.
    pub fn earliest_collision(
        &self,
        moving: &Aabb,
        displacement: Vec3,
        mut is_ignored: impl FnMut(ColliderKey) -> bool,
    ) -> Option<PotentialCollision> {
        let mut earliest: Option<(ColliderKey, &StaticCollider, f32, Vec3)> = None;
        let mut candidates = 0usize;

        for (key, collider) in self.colliders() {
            if is_ignored(key) {
                continue;
            }
            let Some(hit) = sweep_aabb(moving, &collider.aabb, displacement) else {
                continue;
            };
            candidates += 1;
            if earliest.map_or(true, |(_, _, t, _)| hit.entry_time < t) {
                earliest = Some((key, collider, hit.entry_time, hit.normal));
            }
        }

        log::trace!("{} collision candidates for displacement {:?}", candidates, displacement);

        earliest.map(|(key, collider, entry_time, normal)| PotentialCollision {
            entry_time,
            normal,
            key,
            name: collider.name.clone(),
        })
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
