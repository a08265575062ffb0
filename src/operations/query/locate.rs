use crate::error::Result;
use crate::math::Point3;
use crate::volume::{GeometryStore, PhysicalVolumeId};

/// Finds the deepest placement containing a world-frame point.
///
/// Descends from the root, at each level entering the first child whose
/// solid contains the point. Siblings are assumed not to overlap.
pub struct Locate {
    point: Point3,
}

impl Locate {
    /// Creates a new `Locate` query.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }

    /// Executes the query. Returns `None` if the point is outside the world
    /// or no world has been placed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store references a missing entity.
    pub fn execute(&self, store: &GeometryStore) -> Result<Option<PhysicalVolumeId>> {
        let Some(root) = store.root() else {
            return Ok(None);
        };
        let node = store.physical_volume(root)?;
        let mut local = node.transform.inverse_transform_point(&self.point);
        if !store.logical_volume(node.logical)?.solid().inside(&local) {
            return Ok(None);
        }

        let mut current = root;
        'descend: loop {
            for &child in store.children(current)? {
                let node = store.physical_volume(child)?;
                let child_local = node.transform.inverse_transform_point(&local);
                if store.logical_volume(node.logical)?.solid().inside(&child_local) {
                    current = child;
                    local = child_local;
                    continue 'descend;
                }
            }
            return Ok(Some(current));
        }
    }
}
