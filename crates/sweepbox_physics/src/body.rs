//! Static collider records stored in the physics world

use crate::shapes::Aabb;
use slotmap::new_key_type;

// Define generational key type for static colliders
new_key_type! {
    /// Key to a static collider in the physics world
    ///
    /// Uses generational indexing, so a key kept by the trigger layer for a
    /// removed collider never aliases a collider registered later in the same slot.
    pub struct ColliderKey;
}

/// Index of a region in the physics world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    /// Get the raw index of this region
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A static box collider placed in world space
#[derive(Clone, Debug)]
pub struct StaticCollider {
    /// Optional name, reported to the trigger layer when the entity runs into it
    pub name: Option<String>,
    /// Box in world units (region offset and scale already applied)
    pub aabb: Aabb,
    /// Region this collider belongs to
    pub region: RegionId,
}

impl StaticCollider {
    /// Create a new collider in the given region
    pub fn new(name: Option<String>, aabb: Aabb, region: RegionId) -> Self {
        Self { name, aabb, region }
    }

    /// Name of this collider, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether hitting this collider fires a trigger event
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}
