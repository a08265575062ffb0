use tracing::debug;

use crate::error::Result;
use crate::solid::{Shape, Solid};

use super::check_extent;

/// Creates a box solid from its three half-extents.
pub struct MakeBox {
    name: String,
    half_x: f64,
    half_y: f64,
    half_z: f64,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(name: &str, half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self {
            name: name.into(),
            half_x,
            half_y,
            half_z,
        }
    }

    /// Executes the operation, returning the validated solid.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimensions`](crate::error::GeometryError::InvalidDimensions)
    /// if any half-extent is negative or not finite.
    pub fn execute(&self) -> Result<Solid> {
        check_extent(&self.name, "half_x", self.half_x)?;
        check_extent(&self.name, "half_y", self.half_y)?;
        check_extent(&self.name, "half_z", self.half_z)?;

        debug!(
            solid = %self.name,
            half_x = self.half_x,
            half_y = self.half_y,
            half_z = self.half_z,
            "made box"
        );
        Ok(Solid::new(
            &self.name,
            Shape::Box {
                half_x: self.half_x,
                half_y: self.half_y,
                half_z: self.half_z,
            },
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, PetringError};
    use crate::math::units::{CM, M};
    use approx::assert_relative_eq;

    #[test]
    fn world_cube() {
        let world = MakeBox::new("World", 0.5 * M, 0.5 * M, 0.5 * M)
            .execute()
            .unwrap();
        assert_eq!(world.name(), "World");
        assert_relative_eq!(world.cubic_volume(), 1e9);
    }

    #[test]
    fn crystal_box_dimensions() {
        let crystal = MakeBox::new("Crystal", 0.75 * CM, 1.5 * CM, 2.5 * CM)
            .execute()
            .unwrap();
        assert_eq!(
            crystal.shape(),
            &Shape::Box {
                half_x: 7.5,
                half_y: 15.0,
                half_z: 25.0
            }
        );
    }

    #[test]
    fn zero_extent_allowed() {
        assert!(MakeBox::new("Sheet", 1.0, 1.0, 0.0).execute().is_ok());
    }

    #[test]
    fn negative_extent_fails() {
        let result = MakeBox::new("Bad", 1.0, -1.0, 1.0).execute();
        assert!(matches!(
            result,
            Err(PetringError::Geometry(GeometryError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn nan_extent_fails() {
        assert!(MakeBox::new("Bad", f64::NAN, 1.0, 1.0).execute().is_err());
    }
}
