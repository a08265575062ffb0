mod bounding_box;
mod check_overlaps;
mod global_transform;
mod locate;
mod mass;

pub use bounding_box::{Aabb, BoundingBox};
pub use check_overlaps::{CheckOverlaps, Overlap};
pub use global_transform::GlobalTransform;
pub use locate::Locate;
pub use mass::Mass;

pub(crate) use check_overlaps::{overlapping_sibling, protrudes_from};
