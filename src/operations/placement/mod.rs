mod place;
mod ring;

pub use place::Place;
pub use ring::RingPlacement;
