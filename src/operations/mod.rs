pub mod creation;
pub mod placement;
pub mod query;
