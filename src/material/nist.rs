use std::sync::Arc;

use tracing::debug;

use super::{Element, Material};
use crate::error::{MaterialError, Result};
use crate::math::units::{G_PER_CM3, G_PER_MOLE};

/// Source of predefined materials, looked up by standard name.
///
/// Construction receives the database explicitly so that no global registry
/// has to be set up or torn down around it.
pub trait MaterialDatabase: Send + Sync {
    /// Builds the predefined material registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::MaterialNotFound`] if the name is unknown.
    fn find_or_build(&self, name: &str) -> Result<Arc<Material>>;
}

/// Elements known to the database: (name, symbol, Z, A in g/mole).
const ELEMENTS: &[(&str, &str, u32, f64)] = &[
    ("Hydrogen", "H", 1, 1.007_94),
    ("Carbon", "C", 6, 12.010_7),
    ("Nitrogen", "N", 7, 14.006_7),
    ("Oxygen", "O", 8, 15.999_4),
    ("Sodium", "Na", 11, 22.989_77),
    ("Silicon", "Si", 14, 28.085_5),
    ("Argon", "Ar", 18, 39.948),
    ("Germanium", "Ge", 32, 72.64),
    ("Iodine", "I", 53, 126.904_47),
    ("Lutetium", "Lu", 71, 174.967),
    ("Lead", "Pb", 82, 207.217),
    ("Bismuth", "Bi", 83, 208.980_38),
];

enum Recipe {
    Atoms(&'static [(&'static str, u32)]),
    MassFractions(&'static [(&'static str, f64)]),
}

/// Predefined materials: (name, density in g/cm³, recipe by element symbol).
const MATERIALS: &[(&str, f64, Recipe)] = &[
    ("G4_Galactic", 1e-25, Recipe::Atoms(&[("H", 1)])),
    (
        "G4_AIR",
        0.001_204_79,
        Recipe::MassFractions(&[
            ("C", 0.000_124),
            ("N", 0.755_268),
            ("O", 0.231_781),
            ("Ar", 0.012_827),
        ]),
    ),
    ("G4_WATER", 1.0, Recipe::Atoms(&[("H", 2), ("O", 1)])),
    ("G4_Si", 2.33, Recipe::Atoms(&[("Si", 1)])),
    ("G4_Pb", 11.35, Recipe::Atoms(&[("Pb", 1)])),
    (
        "G4_BGO",
        7.13,
        Recipe::Atoms(&[("Bi", 4), ("Ge", 3), ("O", 12)]),
    ),
    ("G4_SODIUM_IODIDE", 3.667, Recipe::Atoms(&[("Na", 1), ("I", 1)])),
    (
        "G4_PLASTIC_SC_VINYLTOLUENE",
        1.032,
        Recipe::MassFractions(&[("H", 0.085), ("C", 0.915)]),
    ),
];

/// Built-in subset of the NIST material database.
///
/// Each database instance owns its elements, so materials built from one
/// instance never share anything with materials from another.
#[derive(Debug)]
pub struct NistDatabase {
    elements: Vec<Arc<Element>>,
}

impl Default for NistDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl NistDatabase {
    /// Creates a database with its own set of shared elements.
    #[must_use]
    pub fn new() -> Self {
        let elements = ELEMENTS
            .iter()
            .map(|&(name, symbol, z, a)| {
                Arc::new(Element {
                    name: name.into(),
                    symbol: symbol.into(),
                    atomic_number: z,
                    atomic_mass: a * G_PER_MOLE,
                })
            })
            .collect();
        Self { elements }
    }

    /// Returns the database's element with the given chemical symbol.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::MaterialNotFound`] if no such element exists.
    pub fn find_element(&self, symbol: &str) -> Result<Arc<Element>> {
        self.elements
            .iter()
            .find(|e| e.symbol() == symbol)
            .cloned()
            .ok_or_else(|| MaterialError::MaterialNotFound(format!("element {symbol}")).into())
    }

    /// Names of all predefined materials.
    pub fn material_names() -> impl Iterator<Item = &'static str> {
        MATERIALS.iter().map(|(name, _, _)| *name)
    }
}

impl MaterialDatabase for NistDatabase {
    fn find_or_build(&self, name: &str) -> Result<Arc<Material>> {
        let (_, density, recipe) = MATERIALS
            .iter()
            .find(|(n, _, _)| *n == name)
            .ok_or_else(|| MaterialError::MaterialNotFound(name.into()))?;

        let material = match recipe {
            Recipe::Atoms(parts) => {
                let components = parts
                    .iter()
                    .map(|&(symbol, n)| Ok((self.find_element(symbol)?, n)))
                    .collect::<Result<Vec<_>>>()?;
                Material::build_composite(name, density * G_PER_CM3, &components)?
            }
            Recipe::MassFractions(parts) => {
                let fractions = parts
                    .iter()
                    .map(|&(symbol, w)| Ok((self.find_element(symbol)?, w)))
                    .collect::<Result<Vec<_>>>()?;
                Material::from_mass_fractions(name, density * G_PER_CM3, &fractions)?
            }
        };
        debug!(material = name, density = material.density(), "built predefined material");
        Ok(Arc::new(material))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PetringError;
    use crate::material::Composition;
    use approx::assert_relative_eq;

    #[test]
    fn water_is_h2o() {
        let db = NistDatabase::new();
        let water = db.find_or_build("G4_WATER").unwrap();
        assert_eq!(water.name(), "G4_WATER");
        assert_eq!(water.total_atoms(), Some(3));
        assert_relative_eq!(water.density(), 1.0);
    }

    #[test]
    fn air_is_a_mass_mixture() {
        let db = NistDatabase::new();
        let air = db.find_or_build("G4_AIR").unwrap();
        assert!(matches!(air.composition(), Composition::MassFractions(_)));
        assert_eq!(air.total_atoms(), None);
        assert_eq!(air.element_count(), 4);
        let total: f64 = air.mass_fractions().iter().map(|(_, w)| w).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn unknown_material_not_found() {
        let db = NistDatabase::new();
        let result = db.find_or_build("G4_UNOBTAINIUM");
        assert!(matches!(
            result,
            Err(PetringError::Material(MaterialError::MaterialNotFound(name))) if name == "G4_UNOBTAINIUM"
        ));
    }

    #[test]
    fn materials_share_database_elements() {
        let db = NistDatabase::new();
        let water = db.find_or_build("G4_WATER").unwrap();
        let air = db.find_or_build("G4_AIR").unwrap();
        let oxygen = db.find_element("O").unwrap();

        let in_water = water.mass_fractions().into_iter().find(|(e, _)| e.symbol() == "O");
        let in_air = air.mass_fractions().into_iter().find(|(e, _)| e.symbol() == "O");
        assert!(Arc::ptr_eq(&in_water.unwrap().0, &oxygen));
        assert!(Arc::ptr_eq(&in_air.unwrap().0, &oxygen));
    }

    #[test]
    fn separate_databases_do_not_share_elements() {
        let a = NistDatabase::new().find_element("Lu").unwrap();
        let b = NistDatabase::new().find_element("Lu").unwrap();
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn every_listed_material_builds() {
        let db = NistDatabase::new();
        for name in NistDatabase::material_names() {
            assert!(db.find_or_build(name).is_ok(), "{name} failed to build");
        }
    }
}
