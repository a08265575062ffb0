mod make_box;
mod make_cylinder;

pub use make_box::MakeBox;
pub use make_cylinder::MakeCylinder;

use crate::error::{GeometryError, PetringError};

/// Rejects negative or non-finite extents.
fn check_extent(solid: &str, parameter: &str, value: f64) -> Result<(), PetringError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimensions {
            name: solid.into(),
            reason: format!("{parameter} must be non-negative, got {value}"),
        }
        .into())
    }
}
