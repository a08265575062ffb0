//! Parametric solids.
//!
//! A solid has a shape and a name but no position or material. Solids are
//! created through [`MakeBox`](crate::operations::creation::MakeBox) and
//! [`MakeCylinder`](crate::operations::creation::MakeCylinder), which
//! validate the dimensions.

use std::f64::consts::FRAC_PI_2;

use crate::math::units::TWO_PI;
use crate::math::{OrientedBox, Point3, Transform, Vector3, TOLERANCE};

/// The parametric description of a solid, in millimetres and radians.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Box centred on the origin.
    Box {
        half_x: f64,
        half_y: f64,
        half_z: f64,
    },
    /// Cylindrical tube segment around the Z axis, centred on the origin.
    ///
    /// The segment covers `start_angle..start_angle + sweep_angle`, with
    /// angles measured from +X towards +Y.
    Cylinder {
        inner_radius: f64,
        outer_radius: f64,
        half_z: f64,
        start_angle: f64,
        sweep_angle: f64,
    },
}

/// A named shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    name: String,
    shape: Shape,
}

impl Solid {
    pub(crate) fn new(name: &str, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Volume enclosed by the solid, in mm³.
    #[must_use]
    pub fn cubic_volume(&self) -> f64 {
        match self.shape {
            Shape::Box {
                half_x,
                half_y,
                half_z,
            } => 8.0 * half_x * half_y * half_z,
            Shape::Cylinder {
                inner_radius,
                outer_radius,
                half_z,
                sweep_angle,
                ..
            } => sweep_angle * (outer_radius.powi(2) - inner_radius.powi(2)) * half_z,
        }
    }

    /// Returns `true` if a point in the solid's local frame lies inside it or
    /// on its surface, within [`TOLERANCE`].
    #[must_use]
    pub fn inside(&self, point: &Point3) -> bool {
        match self.shape {
            Shape::Box {
                half_x,
                half_y,
                half_z,
            } => {
                point.x.abs() <= half_x + TOLERANCE
                    && point.y.abs() <= half_y + TOLERANCE
                    && point.z.abs() <= half_z + TOLERANCE
            }
            Shape::Cylinder {
                inner_radius,
                outer_radius,
                half_z,
                start_angle,
                sweep_angle,
            } => {
                if point.z.abs() > half_z + TOLERANCE {
                    return false;
                }
                let r = point.x.hypot(point.y);
                if r < inner_radius - TOLERANCE || r > outer_radius + TOLERANCE {
                    return false;
                }
                if is_full_turn(sweep_angle) || r < TOLERANCE {
                    return true;
                }
                let angular_tolerance = TOLERANCE / r;
                let offset = (point.y.atan2(point.x) - start_angle).rem_euclid(TWO_PI);
                offset <= sweep_angle + angular_tolerance || offset >= TWO_PI - angular_tolerance
            }
        }
    }

    /// Local axis-aligned extent as `(center, half_extents)`.
    ///
    /// Exact for boxes and full cylinders; for cylinder segments the extent
    /// is the tight box around the swept sector.
    #[must_use]
    pub fn local_extent(&self) -> (Point3, Vector3) {
        match self.shape {
            Shape::Box {
                half_x,
                half_y,
                half_z,
            } => (Point3::origin(), Vector3::new(half_x, half_y, half_z)),
            Shape::Cylinder {
                inner_radius,
                outer_radius,
                half_z,
                start_angle,
                sweep_angle,
            } => {
                if is_full_turn(sweep_angle) {
                    return (
                        Point3::origin(),
                        Vector3::new(outer_radius, outer_radius, half_z),
                    );
                }
                sector_extent(inner_radius, outer_radius, half_z, start_angle, sweep_angle)
            }
        }
    }

    /// The solid's extent moved into the frame described by `transform`.
    #[must_use]
    pub fn oriented_extent(&self, transform: &Transform) -> OrientedBox {
        let (center, half_extents) = self.local_extent();
        OrientedBox::from_local(transform, &center, half_extents)
    }
}

fn is_full_turn(sweep_angle: f64) -> bool {
    sweep_angle >= TWO_PI - 1e-12
}

fn sector_extent(
    inner_radius: f64,
    outer_radius: f64,
    half_z: f64,
    start_angle: f64,
    sweep_angle: f64,
) -> (Point3, Vector3) {
    let start_angle = start_angle.rem_euclid(TWO_PI);
    let end_angle = start_angle + sweep_angle;
    let mut xy: Vec<(f64, f64)> = Vec::with_capacity(9);
    for angle in [start_angle, end_angle] {
        let (s, c) = angle.sin_cos();
        xy.push((inner_radius * c, inner_radius * s));
        xy.push((outer_radius * c, outer_radius * s));
    }

    // Outer rim reaches its extremes where the sector crosses an axis. A
    // sweep of at most 2π crosses at most five axis directions.
    let first_quadrant = (start_angle / FRAC_PI_2).ceil();
    for q in 0..5_u8 {
        let angle = (first_quadrant + f64::from(q)) * FRAC_PI_2;
        if angle > end_angle {
            break;
        }
        let (s, c) = angle.sin_cos();
        xy.push((outer_radius * c, outer_radius * s));
    }

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in xy {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    (
        Point3::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0, 0.0),
        Vector3::new((max_x - min_x) / 2.0, (max_y - min_y) / 2.0, half_z),
    )
}
