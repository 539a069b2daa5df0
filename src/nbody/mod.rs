//! The N-body integrator: acceleration assembly (Plummer softening, 1PN,
//! J2, tidal torque) and four integration schemes over a fixed-capacity
//! array of [`Body`] values.
//!
//! This module and [`crate::invariants`] both monitor "conservation," but
//! over different systems: [`crate::invariants`] tracks a single photon's
//! Hamiltonian and Kerr constants of motion, while [`conservation`] here
//! tracks the energy/momentum/angular-momentum of the gravitating bodies
//! this module advances.

pub mod body;
pub mod conservation;
pub mod forces;
pub mod integrators;
pub mod units;

pub use body::{Body, BodyKind, MAX_NAME_BYTES};
pub use conservation::{check_conservation, compute_invariants, Invariants};
pub use forces::{accumulate, BodyDerivative};
pub use integrators::{step, IntegratorScheme, System, DEFAULT_CAPACITY};
pub use units::{NBodyConfig, UnitsPreset};
