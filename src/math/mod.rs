pub mod obb;
pub mod units;

pub use obb::OrientedBox;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Rotation of a placement relative to its parent frame.
pub type Rotation = nalgebra::UnitQuaternion<f64>;

/// Rigid-body transform (rotation followed by translation).
pub type Transform = nalgebra::Isometry3<f64>;

/// Global geometric tolerance for containment and overlap tests, in millimetres.
pub const TOLERANCE: f64 = 1e-9;
