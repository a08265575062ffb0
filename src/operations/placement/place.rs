use tracing::{debug, warn};

use crate::error::{Result, VolumeError};
use crate::math::{Rotation, Transform, Vector3, TOLERANCE};
use crate::operations::query::{overlapping_sibling, protrudes_from};
use crate::volume::{GeometryStore, LogicalVolumeId, PhysicalVolume, PhysicalVolumeId};

/// Places a logical volume inside a parent placement, or as the world root.
pub struct Place {
    rotation: Rotation,
    translation: Vector3,
    logical: LogicalVolumeId,
    name: String,
    parent: Option<PhysicalVolumeId>,
    copy_number: u32,
    check_overlaps: bool,
}

impl Place {
    /// Creates a new `Place` operation.
    ///
    /// * `rotation` - Orientation of the volume in the parent's frame.
    /// * `translation` - Position of the volume's origin in the parent's frame.
    /// * `parent` - `None` places the world volume.
    #[must_use]
    pub fn new(
        rotation: Rotation,
        translation: Vector3,
        logical: LogicalVolumeId,
        name: &str,
        parent: Option<PhysicalVolumeId>,
        copy_number: u32,
        check_overlaps: bool,
    ) -> Self {
        Self {
            rotation,
            translation,
            logical,
            name: name.into(),
            parent,
            copy_number,
            check_overlaps,
        }
    }

    /// Executes the placement, appending a node to the store.
    ///
    /// With overlap checking enabled, the node's transformed extent is tested
    /// against its parent's solid and against every existing sibling.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::DuplicateRootPlacement`] if a root already
    /// exists and no parent is given, [`VolumeError::InvalidCopyNumber`] if a
    /// sibling of the same logical volume uses the copy number,
    /// [`VolumeError::OverlapDetected`] if the overlap check fails, and
    /// [`VolumeError::EntityNotFound`] for unknown ids.
    pub fn execute(&self, store: &mut GeometryStore) -> Result<PhysicalVolumeId> {
        let solid = store.logical_volume(self.logical)?.solid().clone();
        let transform = Transform::from_parts(self.translation.into(), self.rotation);

        match self.parent {
            None => {
                if let Some(root) = store.root() {
                    return Err(VolumeError::DuplicateRootPlacement {
                        name: self.name.clone(),
                        existing: store.physical_volume(root)?.name.clone(),
                    }
                    .into());
                }
            }
            Some(parent) => {
                for &sibling in store.children(parent)? {
                    let sibling = store.physical_volume(sibling)?;
                    if sibling.logical == self.logical && sibling.copy_number == self.copy_number {
                        return Err(VolumeError::InvalidCopyNumber {
                            name: self.name.clone(),
                            copy_number: self.copy_number,
                        }
                        .into());
                    }
                }

                if self.check_overlaps {
                    self.check_overlaps_in(store, parent, &solid.oriented_extent(&transform))?;
                }
            }
        }

        let id = store.insert_physical_volume(PhysicalVolume {
            name: self.name.clone(),
            logical: self.logical,
            parent: self.parent,
            transform,
            copy_number: self.copy_number,
            check_overlaps: self.check_overlaps,
            children: Vec::new(),
        });
        debug!(
            volume = %self.name,
            copy = self.copy_number,
            x = self.translation.x,
            y = self.translation.y,
            z = self.translation.z,
            "placed volume"
        );
        Ok(id)
    }

    fn check_overlaps_in(
        &self,
        store: &GeometryStore,
        parent: PhysicalVolumeId,
        extent: &crate::math::OrientedBox,
    ) -> Result<()> {
        let label = format!("{}:{}", self.name, self.copy_number);
        let parent_node = store.physical_volume(parent)?;

        if protrudes_from(store.logical_volume(parent_node.logical)?.solid(), extent) {
            warn!(volume = %label, mother = %parent_node.name, "volume protrudes from its mother");
            return Err(VolumeError::OverlapDetected {
                volume: label,
                other: parent_node.name.clone(),
                reason: "protrudes from mother volume",
            }
            .into());
        }

        if let Some((sibling, depth)) = overlapping_sibling(store, parent, extent, TOLERANCE)? {
            let sibling = store.physical_volume(sibling)?;
            let other = format!("{}:{}", sibling.name, sibling.copy_number);
            warn!(volume = %label, other = %other, depth, "volume overlaps a sibling");
            return Err(VolumeError::OverlapDetected {
                volume: label,
                other,
                reason: "overlaps with",
            }
            .into());
        }

        debug!(volume = %label, "checking overlaps ... OK");
        Ok(())
    }
}
