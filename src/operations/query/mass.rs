use crate::error::Result;
use crate::math::units::{CM3, G_PER_CM3};
use crate::volume::{GeometryStore, PhysicalVolumeId};

/// Computes the mass, in grams, of a placement and everything inside it.
///
/// Each daughter's volume is removed from its mother's material and replaced
/// by the daughter's own mass.
pub struct Mass {
    volume: PhysicalVolumeId,
}

impl Mass {
    /// Creates a new `Mass` query.
    #[must_use]
    pub fn new(volume: PhysicalVolumeId) -> Self {
        Self { volume }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the store references a missing entity.
    pub fn execute(&self, store: &GeometryStore) -> Result<f64> {
        let logical = store.logical_of(self.volume)?;
        let mut own_volume = logical.solid().cubic_volume();
        let mut daughters_mass = 0.0;
        for &child in store.children(self.volume)? {
            own_volume -= store.logical_of(child)?.solid().cubic_volume();
            daughters_mass += Mass::new(child).execute(store)?;
        }
        let density = logical.material().density() / G_PER_CM3;
        Ok(density * own_volume.max(0.0) / CM3 + daughters_mass)
    }
}
