//! Chemical elements and the materials built from them.
//!
//! Elements and materials are immutable once built and are shared through
//! [`Arc`] by every material or logical volume that refers to them.

mod nist;

pub use nist::{MaterialDatabase, NistDatabase};

use std::fmt;
use std::sync::Arc;

use crate::error::{MaterialError, Result};
use crate::math::units::{AVOGADRO, CM3, G_PER_CM3, G_PER_MOLE};

/// A chemical element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    symbol: String,
    atomic_number: u32,
    atomic_mass: f64,
}

impl Element {
    /// Defines an element from its atomic number and molar mass (g/mole).
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidElement`] if the atomic number is zero
    /// or the atomic mass is not a positive finite number.
    pub fn new(name: &str, symbol: &str, atomic_number: u32, atomic_mass: f64) -> Result<Self> {
        if atomic_number == 0 {
            return Err(MaterialError::InvalidElement {
                element: name.into(),
                reason: "atomic number must be positive".into(),
            }
            .into());
        }
        if !atomic_mass.is_finite() || atomic_mass <= 0.0 {
            return Err(MaterialError::InvalidElement {
                element: name.into(),
                reason: format!("atomic mass must be positive, got {atomic_mass}"),
            }
            .into());
        }
        Ok(Self {
            name: name.into(),
            symbol: symbol.into(),
            atomic_number,
            atomic_mass,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    /// Molar mass in g/mole.
    #[must_use]
    pub fn atomic_mass(&self) -> f64 {
        self.atomic_mass
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Element: {} ({})  Z = {}  A = {:.3} g/mole",
            self.name,
            self.symbol,
            self.atomic_number,
            self.atomic_mass / G_PER_MOLE
        )
    }
}

/// How a material is made up from its elements.
#[derive(Debug, Clone)]
pub enum Composition {
    /// Stoichiometric recipe: element and number of atoms per formula unit.
    Atoms(Vec<(Arc<Element>, u32)>),
    /// Mixture by mass: element and fraction of the total mass (sums to 1).
    MassFractions(Vec<(Arc<Element>, f64)>),
}

/// A substance with a density, assigned to logical volumes.
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    density: f64,
    composition: Composition,
}

impl Material {
    /// Builds a material from a stoichiometric list of elements.
    ///
    /// Repeated elements (equal name, symbol, Z and A) are merged by summing
    /// their atom counts.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidComposition`] if the density is not
    /// positive, the list is empty, any atom count is zero, or the atoms per
    /// formula unit do not fit in a `u32`.
    pub fn build_composite(
        name: &str,
        density: f64,
        components: &[(Arc<Element>, u32)],
    ) -> Result<Self> {
        check_density(name, density)?;
        if components.is_empty() {
            return Err(invalid_composition(name, "no components given"));
        }

        let mut merged: Vec<(Arc<Element>, u32)> = Vec::with_capacity(components.len());
        for (element, count) in components {
            if *count == 0 {
                return Err(invalid_composition(
                    name,
                    &format!("atom count of {} must be positive", element.symbol()),
                ));
            }
            match merged.iter_mut().find(|(e, _)| **e == **element) {
                Some((_, existing)) => {
                    *existing = existing
                        .checked_add(*count)
                        .ok_or_else(|| too_many_atoms(name))?;
                }
                None => merged.push((Arc::clone(element), *count)),
            }
        }
        // Atoms per formula unit must fit in a u32.
        merged
            .iter()
            .try_fold(0_u32, |total, (_, n)| total.checked_add(*n))
            .ok_or_else(|| too_many_atoms(name))?;

        Ok(Self {
            name: name.into(),
            density,
            composition: Composition::Atoms(merged),
        })
    }

    /// Builds a material from mass fractions.
    ///
    /// Fractions must each be positive and sum to one within 1e-3; they are
    /// renormalised to sum to exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidComposition`] if the density or any
    /// fraction is not positive, the list is empty, or the fractions do not
    /// sum to one.
    pub fn from_mass_fractions(
        name: &str,
        density: f64,
        fractions: &[(Arc<Element>, f64)],
    ) -> Result<Self> {
        check_density(name, density)?;
        if fractions.is_empty() {
            return Err(invalid_composition(name, "no components given"));
        }
        if let Some((element, _)) = fractions.iter().find(|(_, w)| !w.is_finite() || *w <= 0.0) {
            return Err(invalid_composition(
                name,
                &format!("mass fraction of {} must be positive", element.symbol()),
            ));
        }
        let total: f64 = fractions.iter().map(|(_, w)| w).sum();
        if (total - 1.0).abs() > 1e-3 {
            return Err(invalid_composition(
                name,
                &format!("mass fractions sum to {total}, expected 1"),
            ));
        }

        let normalised = fractions
            .iter()
            .map(|(e, w)| (Arc::clone(e), w / total))
            .collect();
        Ok(Self {
            name: name.into(),
            density,
            composition: Composition::MassFractions(normalised),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Density in g/cm³.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    #[must_use]
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Number of distinct elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        match &self.composition {
            Composition::Atoms(c) => c.len(),
            Composition::MassFractions(c) => c.len(),
        }
    }

    /// Atoms per formula unit, for stoichiometric materials.
    #[must_use]
    pub fn total_atoms(&self) -> Option<u32> {
        match &self.composition {
            Composition::Atoms(c) => Some(c.iter().map(|(_, n)| n).sum()),
            Composition::MassFractions(_) => None,
        }
    }

    /// Molar mass of one formula unit in g/mole, for stoichiometric materials.
    #[must_use]
    pub fn molar_mass(&self) -> Option<f64> {
        match &self.composition {
            Composition::Atoms(c) => Some(
                c.iter()
                    .map(|(e, n)| f64::from(*n) * e.atomic_mass())
                    .sum(),
            ),
            Composition::MassFractions(_) => None,
        }
    }

    /// Fraction of the total mass carried by each element.
    #[must_use]
    pub fn mass_fractions(&self) -> Vec<(Arc<Element>, f64)> {
        match &self.composition {
            Composition::MassFractions(c) => c.clone(),
            Composition::Atoms(c) => {
                let total = self.molar_mass().unwrap_or(1.0);
                c.iter()
                    .map(|(e, n)| (Arc::clone(e), f64::from(*n) * e.atomic_mass() / total))
                    .collect()
            }
        }
    }

    /// Number of atoms of each element per cubic millimetre.
    #[must_use]
    pub fn atoms_per_volume(&self) -> Vec<(Arc<Element>, f64)> {
        let grams_per_mm3 = self.density / G_PER_CM3 / CM3;
        self.mass_fractions()
            .into_iter()
            .map(|(e, w)| {
                let n = grams_per_mm3 * w * AVOGADRO / e.atomic_mass();
                (e, n)
            })
            .collect()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Material: {}  density: {:.6} g/cm3  elements: {}",
            self.name,
            self.density / G_PER_CM3,
            self.element_count()
        )?;
        let counts: Vec<Option<u32>> = match &self.composition {
            Composition::Atoms(c) => c.iter().map(|(_, n)| Some(*n)).collect(),
            Composition::MassFractions(c) => vec![None; c.len()],
        };
        for ((element, fraction), count) in self.mass_fractions().iter().zip(counts) {
            write!(f, "  ---> {element}  mass fraction: {:.4} %", fraction * 100.0)?;
            if let Some(n) = count {
                write!(f, "  atoms: {n}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_density(name: &str, density: f64) -> Result<()> {
    if density.is_finite() && density > 0.0 {
        Ok(())
    } else {
        Err(invalid_composition(
            name,
            &format!("density must be positive, got {density}"),
        ))
    }
}

fn too_many_atoms(name: &str) -> crate::error::PetringError {
    invalid_composition(name, "total atom count overflows u32")
}

fn invalid_composition(name: &str, reason: &str) -> crate::error::PetringError {
    MaterialError::InvalidComposition {
        material: name.into(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PetringError;
    use crate::math::units::{G_PER_CM3, G_PER_MOLE};
    use approx::assert_relative_eq;

    fn lso_elements() -> [Arc<Element>; 3] {
        [
            Arc::new(Element::new("Lutetium", "Lu", 71, 174.97 * G_PER_MOLE).unwrap()),
            Arc::new(Element::new("Silicon", "Si", 14, 28.09 * G_PER_MOLE).unwrap()),
            Arc::new(Element::new("Oxygen", "O", 8, 16.00 * G_PER_MOLE).unwrap()),
        ]
    }

    fn is_invalid_composition(result: Result<Material>) -> bool {
        matches!(
            result,
            Err(PetringError::Material(MaterialError::InvalidComposition { .. }))
        )
    }

    #[test]
    fn lso_has_eight_atoms() {
        let [lu, si, o] = lso_elements();
        let lso =
            Material::build_composite("LSO", 7.4 * G_PER_CM3, &[(lu, 2), (si, 1), (o, 5)]).unwrap();
        assert_eq!(lso.total_atoms(), Some(8));
        assert_eq!(lso.element_count(), 3);
        assert_relative_eq!(lso.density(), 7.4);
        assert_relative_eq!(
            lso.molar_mass().unwrap(),
            2.0 * 174.97 + 28.09 + 5.0 * 16.00,
            epsilon = 1e-9
        );
    }

    #[test]
    fn mass_fractions_sum_to_one() {
        let [lu, si, o] = lso_elements();
        let lso =
            Material::build_composite("LSO", 7.4 * G_PER_CM3, &[(lu, 2), (si, 1), (o, 5)]).unwrap();
        let total: f64 = lso.mass_fractions().iter().map(|(_, w)| w).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        let lutetium = lso.mass_fractions()[0].1;
        assert_relative_eq!(lutetium, 349.94 / 458.03, epsilon = 1e-9);
    }

    #[test]
    fn atoms_per_volume_matches_formula_units() {
        let [lu, si, o] = lso_elements();
        let lso =
            Material::build_composite("LSO", 7.4 * G_PER_CM3, &[(lu, 2), (si, 1), (o, 5)]).unwrap();
        let densities = lso.atoms_per_volume();
        let formula_units_per_mm3 = 7.4e-3 * AVOGADRO / lso.molar_mass().unwrap();
        assert_relative_eq!(densities[0].1, 2.0 * formula_units_per_mm3, max_relative = 1e-12);
        assert_relative_eq!(densities[2].1, 5.0 * formula_units_per_mm3, max_relative = 1e-12);
    }

    #[test]
    fn repeated_elements_are_merged() {
        let [_, si, o] = lso_elements();
        let quartz = Material::build_composite(
            "Quartz",
            2.65,
            &[(Arc::clone(&si), 1), (Arc::clone(&o), 1), (o, 1)],
        )
        .unwrap();
        assert_eq!(quartz.element_count(), 2);
        assert_eq!(quartz.total_atoms(), Some(3));
    }

    #[test]
    fn same_name_different_isotope_kept_apart() {
        let oxygen = Arc::new(Element::new("Oxygen", "O", 8, 16.0 * G_PER_MOLE).unwrap());
        let heavy = Arc::new(Element::new("Oxygen", "O18", 8, 18.0 * G_PER_MOLE).unwrap());
        let mixed = Material::build_composite("Mixed", 1.0, &[(oxygen, 1), (heavy, 1)]).unwrap();
        assert_eq!(mixed.element_count(), 2);
        assert_relative_eq!(mixed.molar_mass().unwrap(), 34.0, epsilon = 1e-12);
    }

    #[test]
    fn equal_elements_from_separate_definitions_merge() {
        let [.., o] = lso_elements();
        let [.., other_o] = lso_elements();
        let oxide = Material::build_composite("O2", 1.0, &[(o, 1), (other_o, 1)]).unwrap();
        assert_eq!(oxide.element_count(), 1);
        assert_eq!(oxide.total_atoms(), Some(2));
    }

    #[test]
    fn atom_count_overflow_fails() {
        let [lu, si, _] = lso_elements();
        assert!(is_invalid_composition(Material::build_composite(
            "Big",
            1.0,
            &[(Arc::clone(&lu), 3_000_000_000), (si, 3_000_000_000)]
        )));
        assert!(is_invalid_composition(Material::build_composite(
            "Big",
            1.0,
            &[(Arc::clone(&lu), u32::MAX), (lu, 1)]
        )));
    }

    #[test]
    fn elements_are_shared_not_copied() {
        let [lu, si, o] = lso_elements();
        let lso = Material::build_composite(
            "LSO",
            7.4,
            &[(Arc::clone(&lu), 2), (si, 1), (o, 5)],
        )
        .unwrap();
        let Composition::Atoms(components) = lso.composition() else {
            panic!("expected atom composition");
        };
        assert!(Arc::ptr_eq(&components[0].0, &lu));
    }

    #[test]
    fn non_positive_density_fails() {
        let [lu, ..] = lso_elements();
        assert!(is_invalid_composition(Material::build_composite(
            "Bad",
            0.0,
            &[(Arc::clone(&lu), 1)]
        )));
        assert!(is_invalid_composition(Material::build_composite(
            "Bad",
            -1.0,
            &[(lu, 1)]
        )));
    }

    #[test]
    fn empty_or_zero_count_fails() {
        let [lu, ..] = lso_elements();
        assert!(is_invalid_composition(Material::build_composite("Bad", 1.0, &[])));
        assert!(is_invalid_composition(Material::build_composite(
            "Bad",
            1.0,
            &[(lu, 0)]
        )));
    }

    #[test]
    fn mass_fractions_must_sum_to_one() {
        let [lu, si, _] = lso_elements();
        let result = Material::from_mass_fractions("Bad", 1.0, &[(lu, 0.5), (si, 0.2)]);
        assert!(is_invalid_composition(result));
    }

    #[test]
    fn invalid_element_rejected() {
        let result = Element::new("Nothing", "X", 0, 1.0);
        assert!(matches!(
            result,
            Err(PetringError::Material(MaterialError::InvalidElement { .. }))
        ));
        assert!(Element::new("Weightless", "W0", 1, 0.0).is_err());
    }

    #[test]
    fn display_lists_components() {
        let [lu, si, o] = lso_elements();
        let lso =
            Material::build_composite("LSO", 7.4, &[(lu, 2), (si, 1), (o, 5)]).unwrap();
        let text = lso.to_string();
        assert!(text.starts_with("Material: LSO"));
        assert!(text.contains("Lutetium (Lu)"));
        assert!(text.contains("atoms: 5"));
    }
}
