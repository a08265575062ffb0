use crate::error::Result;
use crate::math::Point3;
use crate::volume::{GeometryStore, PhysicalVolumeId};

use super::GlobalTransform;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

/// Computes the world-frame axis-aligned bounding box of a placement.
pub struct BoundingBox {
    volume: PhysicalVolumeId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(volume: PhysicalVolumeId) -> Self {
        Self { volume }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the placement or one of its ancestors is missing.
    pub fn execute(&self, store: &GeometryStore) -> Result<Aabb> {
        let transform = GlobalTransform::new(self.volume).execute(store)?;
        let solid = store.logical_of(self.volume)?.solid();
        let (min, max) = solid.oriented_extent(&transform).aabb();
        Ok(Aabb { min, max })
    }
}
