use tracing::info;

use crate::error::{GeometryError, Result};
use crate::math::units::{DEG, TWO_PI};
use crate::math::{Rotation, Transform, Vector3};
use crate::volume::{GeometryStore, LogicalVolumeId, PhysicalVolumeId};

use super::Place;

/// Places `count` copies of a logical volume evenly around a ring.
///
/// The ring lies in the parent's XY plane, centred on its Z axis. Element `i`
/// sits at angle `phi = i * 2π / count`, measured from +Y and increasing
/// clockwise when viewed from +Z:
///
/// `position = (R sin(phi), R cos(phi), 0)`
///
/// Each element is rotated about Z by `-phi`, which keeps its local +Y axis
/// pointing radially outward, so its local -Y face looks at the ring axis.
/// Copy numbers equal the ring index.
pub struct RingPlacement {
    count: u32,
    radius: f64,
    logical: LogicalVolumeId,
    name: String,
    parent: PhysicalVolumeId,
}

impl RingPlacement {
    /// Creates a new `RingPlacement` operation.
    #[must_use]
    pub fn new(
        count: u32,
        radius: f64,
        logical: LogicalVolumeId,
        name: &str,
        parent: PhysicalVolumeId,
    ) -> Self {
        Self {
            count,
            radius,
            logical,
            name: name.into(),
            parent,
        }
    }

    /// Angular distance between consecutive elements, in radians.
    #[must_use]
    pub fn step(&self) -> f64 {
        TWO_PI / f64::from(self.count)
    }

    /// Angle of element `index`, in radians.
    #[must_use]
    pub fn angle(&self, index: u32) -> f64 {
        f64::from(index) * self.step()
    }

    /// Transform of element `index` in the parent's frame.
    #[must_use]
    pub fn transform(&self, index: u32) -> Transform {
        let phi = self.angle(index);
        let (sin, cos) = phi.sin_cos();
        let position = Vector3::new(self.radius * sin, self.radius * cos, 0.0);
        let rotation = Rotation::from_axis_angle(&Vector3::z_axis(), -phi);
        Transform::from_parts(position.into(), rotation)
    }

    /// Executes the operation, returning the placements in ring order.
    ///
    /// Every element is placed with overlap checking enabled. The ring is
    /// inserted as a whole: on error the store is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimensions`] if the count is zero or
    /// the radius is not positive, and propagates any error from [`Place`].
    pub fn execute(&self, store: &mut GeometryStore) -> Result<Vec<PhysicalVolumeId>> {
        if self.count == 0 {
            return Err(self.invalid("ring needs at least one element".into()));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(self.invalid(format!("ring radius must be positive, got {}", self.radius)));
        }

        let mut staged = store.clone();
        let mut placed = Vec::with_capacity(self.count as usize);
        for i in 0..self.count {
            let transform = self.transform(i);
            let id = Place::new(
                transform.rotation,
                transform.translation.vector,
                self.logical,
                &self.name,
                Some(self.parent),
                i,
                true,
            )
            .execute(&mut staged)?;
            placed.push(id);
        }
        *store = staged;

        info!(
            volume = %self.name,
            count = self.count,
            radius = self.radius,
            step_deg = self.step() / DEG,
            "placed ring"
        );
        Ok(placed)
    }

    fn invalid(&self, reason: String) -> crate::error::PetringError {
        GeometryError::InvalidDimensions {
            name: self.name.clone(),
            reason,
        }
        .into()
    }
}
