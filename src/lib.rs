pub mod detector;
pub mod error;
pub mod material;
pub mod math;
pub mod operations;
pub mod solid;
pub mod volume;

pub use detector::{construct, construct_with, Detector, DetectorParams};
pub use error::{PetringError, Result};
