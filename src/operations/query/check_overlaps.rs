use tracing::{info, warn};

use crate::error::Result;
use crate::math::{OrientedBox, TOLERANCE};
use crate::solid::Solid;
use crate::volume::{GeometryStore, PhysicalVolumeId};

/// A containment violation found by [`CheckOverlaps`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlap {
    /// The volume's extent reaches outside its mother's solid.
    Protrusion {
        volume: PhysicalVolumeId,
        mother: PhysicalVolumeId,
    },
    /// Two sibling volumes penetrate each other by `depth` millimetres.
    Siblings {
        first: PhysicalVolumeId,
        second: PhysicalVolumeId,
        depth: f64,
    },
}

/// Audits a finished tree for protrusions and sibling overlaps.
///
/// Runs the same test as [`Place`](crate::operations::placement::Place) with
/// overlap checking enabled, but over every node, including those placed
/// without the check.
pub struct CheckOverlaps {
    tolerance: f64,
}

impl Default for CheckOverlaps {
    fn default() -> Self {
        Self::new(TOLERANCE)
    }
}

impl CheckOverlaps {
    /// Creates a new `CheckOverlaps` query.
    ///
    /// * `tolerance` - Penetration depth in millimetres that is still accepted.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Executes the audit, returning every violation found.
    ///
    /// # Errors
    ///
    /// Returns an error if the store references a missing entity.
    pub fn execute(&self, store: &GeometryStore) -> Result<Vec<Overlap>> {
        let mut overlaps = Vec::new();

        for (mother, node) in store.physical_volumes() {
            let mother_solid = store.logical_volume(node.logical)?.solid();

            let mut extents = Vec::with_capacity(node.children.len());
            for &child in &node.children {
                let child_node = store.physical_volume(child)?;
                let extent = store
                    .logical_volume(child_node.logical)?
                    .solid()
                    .oriented_extent(&child_node.transform);
                if protrudes_from(mother_solid, &extent) {
                    warn!(volume = %child_node.name, copy = child_node.copy_number, "protrudes from mother");
                    overlaps.push(Overlap::Protrusion {
                        volume: child,
                        mother,
                    });
                }
                extents.push((child, extent));
            }

            for (i, (first, a)) in extents.iter().enumerate() {
                for (second, b) in &extents[i + 1..] {
                    if let Some(depth) = a.penetration(b, self.tolerance) {
                        warn!(depth, "sibling volumes overlap");
                        overlaps.push(Overlap::Siblings {
                            first: *first,
                            second: *second,
                            depth,
                        });
                    }
                }
            }
        }

        info!(
            placements = store.placement_count(),
            overlaps = overlaps.len(),
            "overlap audit finished"
        );
        Ok(overlaps)
    }
}

/// Returns `true` if any corner of `extent` lies outside `mother`.
///
/// Exact for convex mothers (boxes, full solid cylinders); conservative for
/// curved children, whose extent is their bounding box.
pub(crate) fn protrudes_from(mother: &Solid, extent: &OrientedBox) -> bool {
    extent.corners().iter().any(|corner| !mother.inside(corner))
}

/// Finds the first existing child of `parent` whose extent penetrates
/// `extent`, together with the penetration depth.
pub(crate) fn overlapping_sibling(
    store: &GeometryStore,
    parent: PhysicalVolumeId,
    extent: &OrientedBox,
    tolerance: f64,
) -> Result<Option<(PhysicalVolumeId, f64)>> {
    for &sibling in store.children(parent)? {
        let node = store.physical_volume(sibling)?;
        let other = store
            .logical_volume(node.logical)?
            .solid()
            .oriented_extent(&node.transform);
        if let Some(depth) = extent.penetration(&other, tolerance) {
            return Ok(Some((sibling, depth)));
        }
    }
    Ok(None)
}
