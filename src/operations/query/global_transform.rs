use crate::error::Result;
use crate::math::Transform;
use crate::volume::{GeometryStore, PhysicalVolumeId};

/// Computes the transform from a placement's local frame to the world frame.
pub struct GlobalTransform {
    volume: PhysicalVolumeId,
}

impl GlobalTransform {
    /// Creates a new `GlobalTransform` query.
    #[must_use]
    pub fn new(volume: PhysicalVolumeId) -> Self {
        Self { volume }
    }

    /// Executes the query by composing the chain of ancestor transforms.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement on the path to the root is missing.
    pub fn execute(&self, store: &GeometryStore) -> Result<Transform> {
        let mut transform = Transform::identity();
        let mut current = Some(self.volume);
        while let Some(id) = current {
            let node = store.physical_volume(id)?;
            transform = node.transform * transform;
            current = node.parent;
        }
        Ok(transform)
    }
}
