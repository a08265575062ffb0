use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::units::TWO_PI;
use crate::solid::{Shape, Solid};

use super::check_extent;

/// Creates a cylindrical tube segment around the local Z axis.
///
/// A solid cylinder has `inner_radius = 0` and a sweep of a full turn.
pub struct MakeCylinder {
    name: String,
    inner_radius: f64,
    outer_radius: f64,
    half_z: f64,
    start_angle: f64,
    sweep_angle: f64,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    ///
    /// * `start_angle`, `sweep_angle` - In radians, measured from +X towards +Y.
    #[must_use]
    pub fn new(
        name: &str,
        inner_radius: f64,
        outer_radius: f64,
        half_z: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Self {
        Self {
            name: name.into(),
            inner_radius,
            outer_radius,
            half_z,
            start_angle,
            sweep_angle,
        }
    }

    /// Executes the operation, returning the validated solid.
    ///
    /// A sweep slightly above a full turn, from unit conversion round-off, is
    /// clamped to exactly one turn.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimensions`] if an extent is negative,
    /// the inner radius exceeds the outer radius, or the sweep is not in
    /// `(0, 2π]`.
    pub fn execute(&self) -> Result<Solid> {
        check_extent(&self.name, "inner_radius", self.inner_radius)?;
        check_extent(&self.name, "outer_radius", self.outer_radius)?;
        check_extent(&self.name, "half_z", self.half_z)?;
        if self.inner_radius > self.outer_radius {
            return Err(self.invalid(format!(
                "inner radius {} exceeds outer radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if !self.start_angle.is_finite() {
            return Err(self.invalid(format!("start angle {} is not finite", self.start_angle)));
        }
        if !(self.sweep_angle > 0.0 && self.sweep_angle <= TWO_PI + 1e-12) {
            return Err(self.invalid(format!(
                "sweep angle {} is outside (0, 2π]",
                self.sweep_angle
            )));
        }

        debug!(
            solid = %self.name,
            inner_radius = self.inner_radius,
            outer_radius = self.outer_radius,
            half_z = self.half_z,
            "made cylinder"
        );
        Ok(Solid::new(
            &self.name,
            Shape::Cylinder {
                inner_radius: self.inner_radius,
                outer_radius: self.outer_radius,
                half_z: self.half_z,
                start_angle: self.start_angle,
                sweep_angle: self.sweep_angle.min(TWO_PI),
            },
        ))
    }

    fn invalid(&self, reason: String) -> crate::error::PetringError {
        GeometryError::InvalidDimensions {
            name: self.name.clone(),
            reason,
        }
        .into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PetringError;
    use crate::math::units::{CM, DEG};

    fn is_invalid_dimensions(result: Result<Solid>) -> bool {
        matches!(
            result,
            Err(PetringError::Geometry(GeometryError::InvalidDimensions { .. }))
        )
    }

    #[test]
    fn solid_phantom_is_valid() {
        let phantom = MakeCylinder::new("Phantom", 0.0, 10.0 * CM, 20.0 * CM, 0.0, 360.0 * DEG)
            .execute()
            .unwrap();
        assert_eq!(phantom.name(), "Phantom");
        assert!(matches!(
            phantom.shape(),
            Shape::Cylinder { inner_radius, outer_radius, .. }
                if *inner_radius == 0.0 && *outer_radius == 100.0
        ));
    }

    #[test]
    fn inner_larger_than_outer_fails() {
        let result = MakeCylinder::new("Bad", 15.0 * CM, 10.0 * CM, 1.0, 0.0, 360.0 * DEG).execute();
        assert!(is_invalid_dimensions(result));
    }

    #[test]
    fn negative_half_length_fails() {
        let result = MakeCylinder::new("Bad", 0.0, 1.0, -1.0, 0.0, 360.0 * DEG).execute();
        assert!(is_invalid_dimensions(result));
    }

    #[test]
    fn sweep_out_of_range_fails() {
        let zero = MakeCylinder::new("Bad", 0.0, 1.0, 1.0, 0.0, 0.0).execute();
        assert!(is_invalid_dimensions(zero));
        let too_wide = MakeCylinder::new("Bad", 0.0, 1.0, 1.0, 0.0, 361.0 * DEG).execute();
        assert!(is_invalid_dimensions(too_wide));
    }

    #[test]
    fn partial_sweep_is_valid() {
        assert!(MakeCylinder::new("Arc", 5.0, 6.0, 1.0, 30.0 * DEG, 90.0 * DEG)
            .execute()
            .is_ok());
    }
}
