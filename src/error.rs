use thiserror::Error;

/// Top-level error type for detector geometry construction.
#[derive(Debug, Error)]
pub enum PetringError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Volume(#[from] VolumeError),
}

/// Errors raised while defining elements and materials.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("material not found: {0}")]
    MaterialNotFound(String),

    #[error("invalid composition for material {material}: {reason}")]
    InvalidComposition { material: String, reason: String },

    #[error("invalid element {element}: {reason}")]
    InvalidElement { element: String, reason: String },
}

/// Errors raised by shape and ring parameters.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid dimensions for {name}: {reason}")]
    InvalidDimensions { name: String, reason: String },
}

/// Errors raised while assembling the volume hierarchy.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("cannot place {name} as root: the world volume {existing} is already placed")]
    DuplicateRootPlacement { name: String, existing: String },

    #[error("copy number {copy_number} is already used by a sibling placement of {name}")]
    InvalidCopyNumber { name: String, copy_number: u32 },

    #[error("overlap detected: {volume} {reason} {other}")]
    OverlapDetected {
        volume: String,
        other: String,
        reason: &'static str,
    },

    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Convenience type alias for results using [`PetringError`].
pub type Result<T> = std::result::Result<T, PetringError>;
