use serde::Deserialize;

/// Coulomb's constant (N·m²/C²)
pub const KE: f32 = 8.9875e9;
/// Charge handed out by randomize and by the demo's mouse clicks (C)
pub const CHARGE: f32 = 1e-5;
/// Mass of every particle-particle body (kg)
pub const MASS: f32 = 1e-3;

/// Physical constants shared by both engines.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Constants {
    pub coulomb: f32, // ke
    pub mass: f32,    // same for every body, so the inverse mass is fixed too
    pub charge: f32,  // magnitude used by generators
}

impl Default for Constants {
    fn default() -> Self {
        Constants {
            coulomb: KE,
            mass: MASS,
            charge: CHARGE,
        }
    }
}

impl Constants {
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }
}

/// What an engine does with a pair at (or numerically at) zero separation.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Singularity {
    /// Let the division by zero through; NaN/inf ends up in the sums.
    #[default]
    #[serde(rename = "propagate")]
    Propagate,
    /// Drop any contribution whose coefficient is not finite.
    #[serde(rename = "skip")]
    Skip,
}

impl Singularity {
    /// True when a contribution with this coefficient must be left out.
    /// Zero separation gives inf (or NaN for a neutral charge), and so does a
    /// separation small enough to overflow the division.
    pub fn skips(&self, coefficient: f32) -> bool {
        matches!(self, Singularity::Skip) && !coefficient.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inverse_mass_is_a_thousand() {
        let constants = Constants::default();
        assert!((constants.inverse_mass() - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn only_skip_drops_non_finite_coefficients() {
        assert!(Singularity::Skip.skips(f32::INFINITY));
        assert!(Singularity::Skip.skips(f32::NEG_INFINITY));
        assert!(Singularity::Skip.skips(f32::NAN));
        assert!(!Singularity::Skip.skips(1e30));
        assert!(!Singularity::Skip.skips(0.0));
        assert!(!Singularity::Propagate.skips(f32::INFINITY));
    }
}
