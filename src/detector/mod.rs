//! Construction of the PET ring detector geometry.
//!
//! The detector is a cube of air holding a water phantom at its centre and
//! a ring of LSO crystals around it. [`construct`] builds it from the
//! compiled-in dimensions; [`construct_with`] takes explicit parameters and a
//! material database.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::material::{Element, Material, MaterialDatabase, NistDatabase};
use crate::math::units::{CM, DEG, G_PER_CM3, G_PER_MOLE, M};
use crate::math::{Rotation, Vector3};
use crate::operations::creation::{MakeBox, MakeCylinder};
use crate::operations::placement::{Place, RingPlacement};
use crate::volume::{GeometryStore, LogicalVolume, LogicalVolumeId, PhysicalVolumeId};

/// Edge length of the world cube.
pub const WORLD_SIZE: f64 = 1.0 * M;
/// Radius of the water phantom.
pub const PHANTOM_RADIUS: f64 = 10.0 * CM;
/// Half-length of the water phantom along the ring axis.
pub const PHANTOM_HALF_LENGTH: f64 = 20.0 * CM;
/// Number of crystals in the ring.
pub const CRYSTAL_COUNT: u32 = 60;
/// Distance from the ring axis to each crystal centre.
pub const RING_RADIUS: f64 = 30.0 * CM;
/// Full crystal size: tangential, radial, axial.
pub const CRYSTAL_SIZE: [f64; 3] = [1.5 * CM, 3.0 * CM, 5.0 * CM];
/// Density of lutetium oxyorthosilicate.
pub const LSO_DENSITY: f64 = 7.4 * G_PER_CM3;

/// Dimensions of the detector.
#[derive(Debug, Clone, Copy)]
pub struct DetectorParams {
    /// Edge length of the world cube.
    pub world_size: f64,
    /// Radius of the water phantom.
    pub phantom_radius: f64,
    /// Half-length of the water phantom along Z.
    pub phantom_half_length: f64,
    /// Number of crystals in the ring.
    pub crystal_count: u32,
    /// Distance from the ring axis to each crystal centre.
    pub ring_radius: f64,
    /// Full crystal size along its local X (tangential), Y (radial) and Z (axial).
    pub crystal_size: Vector3,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            phantom_radius: PHANTOM_RADIUS,
            phantom_half_length: PHANTOM_HALF_LENGTH,
            crystal_count: CRYSTAL_COUNT,
            ring_radius: RING_RADIUS,
            crystal_size: Vector3::from(CRYSTAL_SIZE),
        }
    }
}

/// A constructed detector, handed to the transport engine.
#[derive(Debug)]
pub struct Detector {
    /// All volumes of the geometry.
    pub store: GeometryStore,
    /// The world placement at the root of the tree.
    pub world: PhysicalVolumeId,
    /// The logical volume whose interactions should be recorded.
    pub scoring_volume: LogicalVolumeId,
}

/// Builds the detector from the compiled-in dimensions and the built-in
/// NIST database.
///
/// # Errors
///
/// Returns the first error raised by any construction step.
pub fn construct() -> Result<Detector> {
    construct_with(&DetectorParams::default(), &NistDatabase::new())
}

/// Builds the detector from explicit dimensions and material database.
///
/// Every call produces a new, independent geometry. On error the partly
/// built geometry is dropped.
///
/// # Errors
///
/// Returns the first error raised by any construction step.
pub fn construct_with(params: &DetectorParams, materials: &dyn MaterialDatabase) -> Result<Detector> {
    let air = materials.find_or_build("G4_AIR")?;
    let water = materials.find_or_build("G4_WATER")?;
    let lso = Arc::new(build_lso()?);

    let mut store = GeometryStore::new();

    let half_world = 0.5 * params.world_size;
    let world_solid = MakeBox::new("World", half_world, half_world, half_world).execute()?;
    let world_lv = store.add_logical_volume(LogicalVolume::new(world_solid, air, "World"));
    let world = Place::new(Rotation::identity(), Vector3::zeros(), world_lv, "World", None, 0, true)
        .execute(&mut store)?;

    let phantom_solid = MakeCylinder::new(
        "Phantom",
        0.0,
        params.phantom_radius,
        params.phantom_half_length,
        0.0,
        360.0 * DEG,
    )
    .execute()?;
    let phantom_lv = store.add_logical_volume(LogicalVolume::new(phantom_solid, water, "Phantom"));
    Place::new(
        Rotation::identity(),
        Vector3::zeros(),
        phantom_lv,
        "Phantom",
        Some(world),
        0,
        true,
    )
    .execute(&mut store)?;

    let half_crystal = 0.5 * params.crystal_size;
    let crystal_solid =
        MakeBox::new("Crystal", half_crystal.x, half_crystal.y, half_crystal.z).execute()?;
    let crystal_lv = store.add_logical_volume(LogicalVolume::new(crystal_solid, lso, "Crystal"));
    RingPlacement::new(
        params.crystal_count,
        params.ring_radius,
        crystal_lv,
        "Crystal",
        world,
    )
    .execute(&mut store)?;

    info!(
        placements = store.placement_count(),
        crystals = params.crystal_count,
        "constructed detector"
    );
    Ok(Detector {
        store,
        world,
        scoring_volume: crystal_lv,
    })
}

/// Lutetium oxyorthosilicate, Lu₂SiO₅, from hand-defined elements.
fn build_lso() -> Result<Material> {
    let lutetium = Arc::new(Element::new("Lutetium", "Lu", 71, 174.97 * G_PER_MOLE)?);
    let silicon = Arc::new(Element::new("Silicon", "Si", 14, 28.09 * G_PER_MOLE)?);
    let oxygen = Arc::new(Element::new("Oxygen", "O", 8, 16.00 * G_PER_MOLE)?);
    Material::build_composite(
        "LSO_Crystal",
        LSO_DENSITY,
        &[(lutetium, 2), (silicon, 1), (oxygen, 5)],
    )
}
