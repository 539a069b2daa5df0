//! The physical body: the unit of state the N-body integrator advances.

use crate::math::Vec3;

/// Maximum length, in bytes, of a body's display name.
pub const MAX_NAME_BYTES: usize = 31;

/// Taxonomy tag used by the renderer and by J2/tidal heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyKind {
    Planet,
    Star,
    BlackHole,
    Moon,
}

/// A gravitating point mass (with a few non-point attributes: radius, J2,
/// spin) tracked by the N-body integrator.
///
/// Created by a [`crate::scene::Scene`] or [`crate::nbody::System`], mutated
/// only inside an integrator step, and referenced externally by index.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,

    pub mass: f64,
    /// G * mass, pre-cached so force assembly never re-multiplies by G.
    pub gm: f64,
    pub radius: f64,
    pub j2: f64,
    pub moment_of_inertia: f64,
    pub rotation_angle: f64,
    pub rotation_axis: Vec3,

    /// Excluded from position/velocity updates, but still exerts gravity.
    pub is_fixed: bool,
    /// Skipped entirely -- neither exerts nor feels force -- when false.
    pub is_alive: bool,

    pub name: String,
    pub kind: BodyKind,
    /// Base color, components in [0, 1].
    pub color: Vec3,
}

impl Body {
    /// Construct a body, deriving `gm` from `mass` under gravitational
    /// constant `g`. `name` is truncated to [`MAX_NAME_BYTES`] bytes.
    pub fn new(name: &str, kind: BodyKind, mass: f64, g: f64, position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            angular_velocity: Vec3::ZERO,
            mass,
            gm: g * mass,
            radius: 0.0,
            j2: 0.0,
            moment_of_inertia: 1.0,
            rotation_angle: 0.0,
            rotation_axis: Vec3::new(0.0, 0.0, 1.0),
            is_fixed: false,
            is_alive: true,
            name: truncate_name(name),
            kind,
            color: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_j2(mut self, j2: f64, moment_of_inertia: f64) -> Self {
        self.j2 = j2;
        self.moment_of_inertia = moment_of_inertia;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }
}

fn truncate_name(name: &str) -> String {
    if name.len() <= MAX_NAME_BYTES {
        return name.to_string();
    }
    let mut end = MAX_NAME_BYTES;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gm_is_cached_at_construction() {
        let b = Body::new("Sol", BodyKind::Star, 2.0, 3.0, Vec3::ZERO, Vec3::ZERO);
        assert!((b.gm - 6.0).abs() < 1e-12);
    }

    #[test]
    fn name_is_truncated_to_31_bytes() {
        let long = "x".repeat(64);
        let b = Body::new(&long, BodyKind::Planet, 1.0, 1.0, Vec3::ZERO, Vec3::ZERO);
        assert_eq!(b.name.len(), MAX_NAME_BYTES);
    }
}
