//! Crate-wide error type.
//!
//! The CORE has no logging facility of its own (see the crate root docs);
//! every failure mode that a caller must react to is instead part of a
//! function's declared return type, via this enum.

use std::fmt;

/// Programmer-detectable misuse or hard numerical failure.
///
/// Recoverable numeric degradation (a singular metric sampled mid-Christoffel,
/// a super-extremal Kerr horizon, orbital energy with a non-positive
/// denominator) is *not* represented here -- those return a defined sentinel
/// and let the caller continue, per the crate's error-handling design.
#[derive(Debug, Clone, PartialEq)]
pub enum GravitasError {
    /// A metric tensor was not invertible (|det| below the singularity threshold).
    SingularMetric,
    /// Numerical Christoffel computation failed because the metric was singular
    /// at every sampled offset.
    ChristoffelFailed,
    /// An adaptive integration step could not meet tolerance within its bounds.
    StepFailed,
    /// A geodesic or body crossed an event horizon outside of the normal
    /// termination dispatch (used for defensive checks, not propagation results).
    HorizonCrossing,
    /// A component was added with a size that does not match the size already
    /// registered for that component type.
    ComponentSizeMismatch { type_id: u32, expected: usize, actual: usize },
    /// An entity ID was outside the world's valid range.
    EntityOutOfRange { entity: u32, capacity: u32 },
    /// A component pool could not be allocated.
    PoolAllocFailed { type_id: u32 },
    /// A snapshot buffer did not begin with the expected magic number.
    SaveFormatInvalid { found_magic: u32 },
    /// A snapshot buffer's version field was not supported.
    SaveVersionMismatch { found_version: u32, expected_version: u32 },
}

impl fmt::Display for GravitasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingularMetric => write!(f, "metric tensor is singular (not invertible)"),
            Self::ChristoffelFailed => write!(f, "christoffel computation failed: singular metric"),
            Self::StepFailed => write!(f, "adaptive integration step failed to meet tolerance"),
            Self::HorizonCrossing => write!(f, "state crossed an event horizon"),
            Self::ComponentSizeMismatch { type_id, expected, actual } => write!(
                f,
                "component type {type_id} registered with size {expected}, got {actual}"
            ),
            Self::EntityOutOfRange { entity, capacity } => {
                write!(f, "entity {entity} is out of range (capacity {capacity})")
            }
            Self::PoolAllocFailed { type_id } => {
                write!(f, "failed to allocate component pool for type {type_id}")
            }
            Self::SaveFormatInvalid { found_magic } => {
                write!(f, "invalid snapshot magic: 0x{found_magic:08x}")
            }
            Self::SaveVersionMismatch { found_version, expected_version } => write!(
                f,
                "unsupported snapshot version {found_version} (expected {expected_version})"
            ),
        }
    }
}

impl std::error::Error for GravitasError {}

/// Convenience alias for fallible CORE operations.
pub type Result<T> = std::result::Result<T, GravitasError>;
