//! Unit presets and the N-body configuration they seed.
//!
//! Two numeric regimes are supported: a "natural units" preset (G = 1,
//! c = 100, softening 0.5) tuned for interactive visualization, and an
//! "SI" preset for physically dimensioned scenarios. Which one applies
//! is a caller-visible configuration, not a compile-time choice -- see
//! the design notes for the reasoning.

use crate::constants;

/// Selects the numeric regime a [`NBodyConfig`] is seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitsPreset {
    /// G = 1, c = 100, softening = 0.5 -- tuned for interactive visualization.
    Natural,
    /// G = 6.67430e-11, c = 299 792 458, softening = 1e5 m.
    Si,
}

/// Tunable parameters for the N-body force assembly and integrator.
///
/// Every field here is a caller-visible knob, not a hardcoded constant --
/// the softening length, the 1PN activation threshold, and the tidal-torque
/// coefficient are all regime-dependent, so they're exposed rather than
/// baked into the force law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NBodyConfig {
    pub gravitational_constant: f64,
    pub speed_of_light: f64,
    /// Plummer softening length `SOFTENING_DIST`.
    pub softening: f64,
    /// Minimum partner GM for the 1PN correction to activate.
    pub pn_threshold: f64,
    /// Tidal-torque coefficient `k` (default 1e-5, scaled up from a
    /// physical value to bring spin-orbit locking within a viewable timescale).
    pub tidal_k: f64,
}

impl NBodyConfig {
    pub fn from_preset(preset: UnitsPreset) -> Self {
        match preset {
            UnitsPreset::Natural => Self {
                gravitational_constant: constants::G,
                speed_of_light: 100.0,
                softening: 0.5,
                pn_threshold: 1.0,
                tidal_k: 1e-5,
            },
            UnitsPreset::Si => Self {
                gravitational_constant: constants::SI_G,
                speed_of_light: constants::SI_C,
                softening: 1.0e5,
                pn_threshold: 1.0e25,
                tidal_k: 1e-5,
            },
        }
    }
}

impl Default for NBodyConfig {
    fn default() -> Self {
        Self::from_preset(UnitsPreset::Natural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_and_si_presets_disagree_on_softening() {
        let nat = NBodyConfig::from_preset(UnitsPreset::Natural);
        let si = NBodyConfig::from_preset(UnitsPreset::Si);
        assert!((nat.softening - 0.5).abs() < 1e-12);
        assert!((si.softening - 1.0e5).abs() < 1e-6);
        assert!(nat.pn_threshold < si.pn_threshold);
    }
}
