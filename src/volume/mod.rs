//! Logical volumes, physical placements, and the arena that owns them.

use std::sync::Arc;

use slotmap::SlotMap;

use crate::error::VolumeError;
use crate::material::Material;
use crate::math::Transform;
use crate::solid::Solid;

slotmap::new_key_type! {
    /// Unique identifier for a logical volume in the geometry store.
    pub struct LogicalVolumeId;
}

slotmap::new_key_type! {
    /// Unique identifier for a physical placement in the geometry store.
    pub struct PhysicalVolumeId;
}

/// A named solid filled with a material, not yet positioned.
#[derive(Debug, Clone)]
pub struct LogicalVolume {
    name: String,
    solid: Solid,
    material: Arc<Material>,
}

impl LogicalVolume {
    /// Creates a logical volume owning `solid` and sharing `material`.
    #[must_use]
    pub fn new(solid: Solid, material: Arc<Material>, name: &str) -> Self {
        Self {
            name: name.into(),
            solid,
            material,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    #[must_use]
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

/// A placement of a logical volume inside its parent.
#[derive(Debug, Clone)]
pub struct PhysicalVolume {
    /// Name of the placement.
    pub name: String,
    /// The logical volume this placement instantiates.
    pub logical: LogicalVolumeId,
    /// Parent placement; `None` only for the world volume.
    pub parent: Option<PhysicalVolumeId>,
    /// Position and orientation in the parent's frame.
    pub transform: Transform,
    /// Distinguishes repeated placements of the same logical volume.
    pub copy_number: u32,
    /// Whether overlaps were checked when the node was inserted.
    pub check_overlaps: bool,
    /// Placements inside this one, in insertion order.
    pub children: Vec<PhysicalVolumeId>,
}

/// Arena that owns every logical volume and placement of one geometry.
///
/// Placements reference each other through typed ids. The tree is built
/// append-only by [`Place`](crate::operations::placement::Place) and is
/// read-only once construction returns.
#[derive(Debug, Clone, Default)]
pub struct GeometryStore {
    logical_volumes: SlotMap<LogicalVolumeId, LogicalVolume>,
    physical_volumes: SlotMap<PhysicalVolumeId, PhysicalVolume>,
    root: Option<PhysicalVolumeId>,
}

impl GeometryStore {
    /// Creates a new, empty geometry store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Logical volume operations ---

    /// Inserts a logical volume and returns its ID.
    pub fn add_logical_volume(&mut self, volume: LogicalVolume) -> LogicalVolumeId {
        self.logical_volumes.insert(volume)
    }

    /// Returns a reference to the logical volume, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn logical_volume(&self, id: LogicalVolumeId) -> Result<&LogicalVolume, VolumeError> {
        self.logical_volumes
            .get(id)
            .ok_or_else(|| VolumeError::EntityNotFound("logical volume".into()))
    }

    /// Iterates over all logical volumes.
    pub fn logical_volumes(&self) -> impl Iterator<Item = (LogicalVolumeId, &LogicalVolume)> {
        self.logical_volumes.iter()
    }

    // --- Physical volume operations ---

    /// Inserts a placement node, linking it under its parent.
    ///
    /// Validation happens in [`Place`](crate::operations::placement::Place).
    pub(crate) fn insert_physical_volume(&mut self, volume: PhysicalVolume) -> PhysicalVolumeId {
        let parent = volume.parent;
        let id = self.physical_volumes.insert(volume);
        match parent {
            Some(parent) => {
                if let Some(node) = self.physical_volumes.get_mut(parent) {
                    node.children.push(id);
                }
            }
            None => self.root = Some(id),
        }
        id
    }

    /// Returns a reference to the placement, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn physical_volume(&self, id: PhysicalVolumeId) -> Result<&PhysicalVolume, VolumeError> {
        self.physical_volumes
            .get(id)
            .ok_or_else(|| VolumeError::EntityNotFound("physical volume".into()))
    }

    /// Iterates over all placements.
    pub fn physical_volumes(&self) -> impl Iterator<Item = (PhysicalVolumeId, &PhysicalVolume)> {
        self.physical_volumes.iter()
    }

    /// The world placement, once placed.
    #[must_use]
    pub fn root(&self) -> Option<PhysicalVolumeId> {
        self.root
    }

    /// Children of a placement, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn children(&self, id: PhysicalVolumeId) -> Result<&[PhysicalVolumeId], VolumeError> {
        Ok(&self.physical_volume(id)?.children)
    }

    /// Placements that instantiate the given logical volume.
    pub fn placements_of(
        &self,
        logical: LogicalVolumeId,
    ) -> impl Iterator<Item = (PhysicalVolumeId, &PhysicalVolume)> {
        self.physical_volumes
            .iter()
            .filter(move |(_, pv)| pv.logical == logical)
    }

    /// Number of placements in the tree.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.physical_volumes.len()
    }

    /// Resolves the logical volume instantiated by a placement.
    ///
    /// # Errors
    ///
    /// Returns an error if either entity is not found in the store.
    pub fn logical_of(&self, id: PhysicalVolumeId) -> Result<&LogicalVolume, VolumeError> {
        self.logical_volume(self.physical_volume(id)?.logical)
    }
}
