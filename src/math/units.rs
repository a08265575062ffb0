//! Internal unit system.
//!
//! Lengths are millimetres, angles radians, densities g/cm³ and molar
//! masses g/mole. Quantities are converted once by multiplying with the
//! constants below, e.g. `30.0 * CM` or `360.0 * DEG`.

use std::f64::consts::PI;

pub const MM: f64 = 1.0;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;

/// Cubic millimetres in one cubic centimetre.
pub const CM3: f64 = CM * CM * CM;

pub const RAD: f64 = 1.0;
pub const DEG: f64 = PI / 180.0 * RAD;

/// A full turn.
pub const TWO_PI: f64 = 2.0 * PI;

pub const G_PER_CM3: f64 = 1.0;
pub const G_PER_MOLE: f64 = 1.0;

/// Avogadro constant, per mole.
pub const AVOGADRO: f64 = 6.022_140_76e23;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lengths_scale_from_millimetres() {
        assert_relative_eq!(30.0 * CM, 300.0);
        assert_relative_eq!(0.5 * M, 500.0);
        assert_relative_eq!(CM3, 1000.0);
    }

    #[test]
    fn full_turn_in_degrees() {
        assert_relative_eq!(360.0 * DEG, TWO_PI);
    }
}
